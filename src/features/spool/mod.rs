pub mod models;
pub mod collector;

pub use models::{ContentTable, FileEntry};
pub use collector::{filter_by_suffix, list_entries, load_contents, split_lines, SpoolCollector};
