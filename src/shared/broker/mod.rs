pub mod amqp;
pub mod memory;

pub use amqp::AmqpBroker;
pub use memory::{FailurePoint, MemoryBroker, MemoryStats};
