pub mod pipeline;
pub mod publish;
pub mod relocate;
pub mod report;
pub mod spool;
