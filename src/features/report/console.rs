use crate::features::spool::ContentTable;
use crate::shared::error::SpoolError;
use std::io::Write;

pub const CONTENT_HEADER: &str = "Content of files:";

/// Prints the raw lines of a content table, file by file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report<W: Write>(&self, table: &ContentTable, out: &mut W) -> Result<usize, SpoolError> {
        writeln!(out, "{}", CONTENT_HEADER)?;
        let mut written = 0;
        for line in table.lines() {
            writeln!(out, "{}", line)?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::spool::FileEntry;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    #[test]
    fn prints_header_then_lines_in_table_order() {
        let mut table = ContentTable::new();
        table.insert(
            FileEntry {
                path: PathBuf::from("b.txt"),
                name: String::from("b.txt"),
                modified: Utc.timestamp_opt(20, 0).unwrap(),
            },
            vec!["b1".into()],
        );
        table.insert(
            FileEntry {
                path: PathBuf::from("a.txt"),
                name: String::from("a.txt"),
                modified: Utc.timestamp_opt(10, 0).unwrap(),
            },
            vec!["a1".into(), "".into()],
        );

        let mut out = Vec::new();
        let written = ConsoleReporter::new().report(&table, &mut out).unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "Content of files:\na1\n\nb1\n");
    }

    #[test]
    fn empty_table_prints_only_the_header() {
        let mut out = Vec::new();
        let written = ConsoleReporter::new()
            .report(&ContentTable::new(), &mut out)
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "Content of files:\n");
    }
}
