use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub modified: DateTime<Utc>,
}

impl FileEntry {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let modified = fs::metadata(path)?.modified()?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            modified: DateTime::<Utc>::from(modified),
        })
    }

    /// Oldest first; equal timestamps fall back to the path.
    fn order(&self, other: &Self) -> Ordering {
        self.modified
            .cmp(&other.modified)
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Files and their lines, kept in ascending modification order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTable {
    entries: Vec<(FileEntry, Vec<String>)>,
}

impl ContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: FileEntry, lines: Vec<String>) {
        let index = self
            .entries
            .partition_point(|(existing, _)| existing.order(&entry) != Ordering::Greater);
        self.entries.insert(index, (entry, lines));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.entries.iter().map(|(_, lines)| lines.len()).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().map(|(entry, _)| entry)
    }

    /// Every line of every file, in table order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(_, lines)| lines.iter().map(String::as_str))
    }
}
