//! Test utilities for building package fixtures.
//!
//! Compiled for this crate's own tests and behind the `test-utils` feature.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed
/// with mode 0o644.
///
/// # Examples
///
/// ```
/// use nuget_validate_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("runtimes/win-x64/native/onnxruntime.dll", b"MZ")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for &(path, data) in entries {
        zip.start_file(path, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Writes a package named `name` into `dir` and returns its path.
///
/// # Examples
///
/// ```
/// use nuget_validate_core::test_utils::write_test_package;
///
/// let dir = tempfile::tempdir().unwrap();
/// let package = write_test_package(
///     dir.path(),
///     "pkg.nupkg",
///     &[("runtimes/linux-x64/native/libonnxruntime.so", b"ELF")],
/// );
/// assert!(package.exists());
/// ```
pub fn write_test_package(dir: &Path, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, create_test_zip(entries)).unwrap();
    path
}
