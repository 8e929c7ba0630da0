use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    NonPersistent,
}

impl DeliveryMode {
    /// AMQP 0-9-1 `delivery-mode` property value.
    pub fn as_amqp(self) -> u8 {
        match self {
            DeliveryMode::NonPersistent => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub delivery_mode: DeliveryMode,
}

impl Message {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            delivery_mode: DeliveryMode::NonPersistent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Connect,
    Session,
    Produce,
    Send,
    Commit,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStage::Connect => "connect",
            PublishStage::Session => "session",
            PublishStage::Produce => "produce",
            PublishStage::Send => "send",
            PublishStage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// What happened to one iteration's messages. Never an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published {
        messages: usize,
    },
    NothingToPublish,
    Failed {
        stage: PublishStage,
        reason: String,
        rolled_back: bool,
    },
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Published { messages } => write!(f, "published {} messages", messages),
            PublishOutcome::NothingToPublish => f.write_str("nothing to publish"),
            PublishOutcome::Failed {
                stage,
                reason,
                rolled_back,
            } => write!(
                f,
                "failed at {} ({}), rolled back: {}",
                stage, reason, rolled_back
            ),
        }
    }
}
