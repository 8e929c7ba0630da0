use crate::features::spool::models::{ContentTable, FileEntry};
use crate::shared::error::SpoolError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads pending files out of the source directory.
pub struct SpoolCollector {
    source_dir: PathBuf,
    suffix: String,
}

impl SpoolCollector {
    pub fn new(source_dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            suffix: suffix.into(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Lists the source directory and keeps the entries carrying the suffix.
    pub fn scan(&self) -> Result<Vec<PathBuf>, SpoolError> {
        let paths = list_entries(&self.source_dir)?;
        let total = paths.len();
        let matched = filter_by_suffix(paths, &self.suffix);
        debug!(
            "Scanned {}: {} entries, {} matching {}",
            self.source_dir.display(),
            total,
            matched.len(),
            self.suffix
        );
        Ok(matched)
    }

    pub fn load(&self, paths: &[PathBuf]) -> Result<ContentTable, SpoolError> {
        let table = load_contents(paths)?;
        if !table.is_empty() {
            info!(
                "Loaded {} files with {} lines from {}",
                table.len(),
                table.line_count(),
                self.source_dir.display()
            );
        }
        Ok(table)
    }
}

/// Direct children of `dir`, in whatever order the OS returns them.
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, SpoolError> {
    let list_error = |source| SpoolError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        paths.push(entry.map_err(list_error)?.path());
    }
    Ok(paths)
}

/// Case-sensitive suffix match on the file name. Order is preserved.
pub fn filter_by_suffix(paths: Vec<PathBuf>, suffix: &str) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(suffix))
        })
        .collect()
}

pub fn load_contents(paths: &[PathBuf]) -> Result<ContentTable, SpoolError> {
    let mut table = ContentTable::new();
    for path in paths {
        let read_error = |source| SpoolError::Read {
            path: path.clone(),
            source,
        };
        let entry = FileEntry::from_path(path).map_err(read_error)?;
        let text = fs::read_to_string(path).map_err(read_error)?;
        let lines = split_lines(&text);
        debug!("Read {} lines from {}", lines.len(), path.display());
        table.insert(entry, lines);
    }
    Ok(table)
}

/// Splits on `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// yield an empty last line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(index) => {
                lines.push(rest[..index].to_string());
                let width = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[index + width..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn filter_keeps_exact_case_sensitive_suffix() {
        let paths = vec![
            PathBuf::from("dir/b.txt"),
            PathBuf::from("dir/notes.TXT"),
            PathBuf::from("dir/a.txt.bak"),
            PathBuf::from("dir/app.log"),
            PathBuf::from("dir/txt"),
            PathBuf::from("dir/a.txt"),
            PathBuf::from("dir/.txt"),
        ];
        let kept = filter_by_suffix(paths, ".txt");
        assert_eq!(
            kept,
            [
                PathBuf::from("dir/b.txt"),
                PathBuf::from("dir/a.txt"),
                PathBuf::from("dir/.txt"),
            ]
        );
    }

    #[test]
    fn filter_of_nothing_is_nothing() {
        assert!(filter_by_suffix(Vec::new(), ".txt").is_empty());
    }

    #[test]
    fn splits_every_line_ending_style() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), ["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), ["a", "", "b"]);
        assert_eq!(split_lines("\n"), [""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn lists_files_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.txt"), "1").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let mut names: Vec<_> = list_entries(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["nested", "one.txt"]);
    }

    #[test]
    fn listing_a_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = list_entries(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, SpoolError::List { .. }));
        assert_eq!(err.io_kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn loading_a_vanished_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_contents(&[dir.path().join("gone.txt")]).unwrap_err();
        assert!(matches!(err, SpoolError::Read { .. }));
    }

    #[test]
    fn loading_non_utf8_content_fails_with_invalid_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, b"\xff\xfe\x00").unwrap();
        let err = load_contents(&[path]).unwrap_err();
        assert_eq!(err.io_kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn scan_only_returns_matching_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("keep.txt"), "x").unwrap();
        fs::write(dir.path().join("skip.log"), "y").unwrap();

        let collector = SpoolCollector::new(dir.path(), ".txt");
        assert_eq!(collector.scan().unwrap(), [dir.path().join("keep.txt")]);
    }
}
