/*!
 * Core types and data structures for paper-export
 */

use serde::Deserialize;

/// Metadata of a file entry in a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileMetadata {
    /// Last path component
    pub name: String,
    /// Opaque remote identifier ("id:...")
    pub id: String,
    /// Full path with display casing
    #[serde(default)]
    pub path_display: Option<String>,
    /// Full path, lowercased
    #[serde(default)]
    pub path_lower: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
}

/// Metadata of a folder entry in a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderMetadata {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub path_display: Option<String>,
}

/// Marker for a deleted entry in a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeletedMetadata {
    pub name: String,
    #[serde(default)]
    pub path_display: Option<String>,
}

/// One entry of a folder listing, tagged by its `.tag` field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum Entry {
    /// Regular file
    File(FileMetadata),
    /// Folder
    Folder(FolderMetadata),
    /// Deleted file or folder
    Deleted(DeletedMetadata),
    /// Any tag this tool does not know about
    #[serde(other)]
    Unknown,
}

impl Entry {
    /// Best-effort path of the entry, for logging
    pub fn display_path(&self) -> &str {
        match self {
            Entry::File(meta) => meta
                .path_display
                .as_deref()
                .or(meta.path_lower.as_deref())
                .unwrap_or(&meta.name),
            Entry::Folder(meta) => meta.path_display.as_deref().unwrap_or(&meta.name),
            Entry::Deleted(meta) => meta.path_display.as_deref().unwrap_or(&meta.name),
            Entry::Unknown => "<unknown entry>",
        }
    }

    /// Short name of the entry kind
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::File(_) => "file",
            Entry::Folder(_) => "folder",
            Entry::Deleted(_) => "deleted",
            Entry::Unknown => "unknown",
        }
    }

    /// Convert a file entry into a record the pipeline can process.
    ///
    /// Returns `None` for every non-file variant and for files whose path is
    /// not known.
    pub fn file_record(&self) -> Option<FileRecord> {
        let Entry::File(meta) = self else {
            return None;
        };
        let path = meta.path_display.as_ref().or(meta.path_lower.as_ref())?;

        Some(FileRecord {
            path: path.clone(),
            id: meta.id.clone(),
            name: meta.name.clone(),
        })
    }
}

/// A remote file selected for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute remote path
    pub path: String,
    /// Opaque remote handle used for export
    pub id: String,
    /// File name
    pub name: String,
}

/// One page of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Entries in listing order
    pub entries: Vec<Entry>,
    /// Cursor for fetching the next page
    pub cursor: String,
    /// Whether more pages follow
    pub has_more: bool,
}

impl Page {
    /// Number of file entries in this page
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::File(_)))
            .count()
    }
}
