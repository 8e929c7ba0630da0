pub mod models;
pub mod publisher;

pub use models::{DeliveryMode, Message, PublishOutcome, PublishStage};
pub use publisher::Publisher;
