pub mod features;
pub mod shared;

pub use features::pipeline::{IterationReport, Pipeline};
pub use features::publish::{DeliveryMode, Message, PublishOutcome, PublishStage, Publisher};
pub use features::relocate::Relocator;
pub use features::report::ConsoleReporter;
pub use features::spool::{ContentTable, FileEntry, SpoolCollector};

pub use shared::broker::{AmqpBroker, FailurePoint, MemoryBroker, MemoryStats};
pub use shared::config::{BrokerConfig, Config, FsErrorPolicy};
pub use shared::error::{BrokerError, ConfigError, SpoolError, SpoolqError};
pub use shared::traits::{BrokerConnection, MessageBroker, TransactedSession, Trigger, Validatable};
pub use shared::trigger::FixedDelay;
