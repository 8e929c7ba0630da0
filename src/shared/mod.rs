pub mod broker;
pub mod config;
pub mod error;
pub mod traits;
pub mod trigger;

pub use error::*;
pub use traits::*;
