pub mod relocator;

pub use relocator::Relocator;
