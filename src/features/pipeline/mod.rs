pub mod runner;

pub use runner::{IterationReport, Pipeline};
