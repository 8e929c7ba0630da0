use crate::shared::error::SpoolError;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Moves processed files into the target directory with a single rename each.
pub struct Relocator {
    target_dir: PathBuf,
}

impl Relocator {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    fn ensure_target_dir(&self) -> Result<PathBuf, SpoolError> {
        if !self.target_dir.is_dir() {
            fs::create_dir_all(&self.target_dir).map_err(|source| SpoolError::CreateDir {
                path: self.target_dir.clone(),
                source,
            })?;
            info!("Created target directory {}", self.target_dir.display());
        }

        Ok(fs::canonicalize(&self.target_dir).unwrap_or_else(|_| self.target_dir.clone()))
    }

    /// Writes a `Moving <name> to <dir>` line to `out` per file and returns the
    /// new locations. An existing entry under the same name is never replaced.
    pub fn relocate<W: Write>(
        &self,
        paths: &[PathBuf],
        out: &mut W,
    ) -> Result<Vec<PathBuf>, SpoolError> {
        let absolute_target = self.ensure_target_dir()?;
        let mut moved = Vec::with_capacity(paths.len());

        for path in paths {
            let Some(name) = path.file_name() else {
                return Err(SpoolError::Move {
                    from: path.clone(),
                    to: self.target_dir.clone(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
                });
            };
            let destination = self.target_dir.join(name);

            writeln!(
                out,
                "Moving {} to {}",
                name.to_string_lossy(),
                absolute_target.display()
            )?;

            let move_error = |source| SpoolError::Move {
                from: path.clone(),
                to: destination.clone(),
                source,
            };

            if fs::symlink_metadata(&destination).is_ok() {
                return Err(move_error(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "target already contains an entry with this name",
                )));
            }

            fs::rename(path, &destination).map_err(move_error)?;
            debug!("Moved {} to {}", path.display(), destination.display());
            moved.push(destination);
        }

        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn moves_files_and_creates_missing_target() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("source");
        let target = root.path().join("nested").join("target");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), "alpha\n").unwrap();

        let relocator = Relocator::new(&target);
        let mut out = Vec::new();
        let moved = relocator.relocate(&[source.join("a.txt")], &mut out).unwrap();

        assert_eq!(moved, [target.join("a.txt")]);
        assert!(!source.join("a.txt").exists());
        assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "alpha\n");

        let progress = String::from_utf8(out).unwrap();
        let expected_dir = fs::canonicalize(&target).unwrap();
        assert_eq!(
            progress,
            format!("Moving a.txt to {}\n", expected_dir.display())
        );
    }

    #[test]
    fn refuses_to_replace_an_existing_target_entry() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(root.path().join("a.txt"), "new").unwrap();
        fs::write(target.join("a.txt"), "old").unwrap();

        let err = Relocator::new(&target)
            .relocate(&[root.path().join("a.txt")], &mut io::sink())
            .unwrap_err();

        assert!(matches!(err, SpoolError::Move { .. }));
        assert_eq!(err.io_kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "old");
        assert!(root.path().join("a.txt").exists());
    }

    #[test]
    fn target_is_created_even_with_nothing_to_move() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        let moved = Relocator::new(&target).relocate(&[], &mut io::sink()).unwrap();
        assert!(moved.is_empty());
        assert!(target.is_dir());
    }
}
