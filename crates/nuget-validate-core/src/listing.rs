//! Archive entry listings.

use std::collections::BTreeSet;
use std::io::Read;
use std::io::Seek;

/// The set of entry names inside an archive.
///
/// Names are stored exactly as recorded in the archive's central directory:
/// forward slashes, case preserved. Lookups are exact string matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveListing {
    entries: BTreeSet<String>,
}

impl ArchiveListing {
    /// Builds a listing from an open ZIP archive.
    ///
    /// Only the central directory is consulted; no entry data is read.
    pub fn from_zip<R: Read + Seek>(archive: &zip::ZipArchive<R>) -> Self {
        archive.file_names().map(str::to_owned).collect()
    }

    /// Returns `true` if the archive has an entry with exactly this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entry names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ArchiveListing {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ArchiveListing {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}
