use async_trait::async_trait;
use crate::features::publish::Message;
use crate::shared::error::BrokerError;

pub trait Validatable {
    fn validate(&self) -> Result<(), String>;
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Decides when the next iteration starts.
#[async_trait]
pub trait Trigger: Send {
    async fn wait(&mut self);
}

#[async_trait]
pub trait MessageBroker: Send + Sync {
    type Connection: BrokerConnection;

    async fn connect(&self) -> Result<Self::Connection, BrokerError>;
}

#[async_trait]
pub trait BrokerConnection: Send {
    type Session: TransactedSession;

    async fn open_session(&mut self) -> Result<Self::Session, BrokerError>;
    async fn close(self) -> Result<(), BrokerError>;
}

/// Sent messages stay invisible to consumers until `commit`.
#[async_trait]
pub trait TransactedSession: Send {
    async fn declare_queue(&mut self, queue: &str) -> Result<(), BrokerError>;
    async fn send(&mut self, queue: &str, message: &Message) -> Result<(), BrokerError>;
    async fn commit(&mut self) -> Result<(), BrokerError>;
    async fn rollback(&mut self) -> Result<(), BrokerError>;
    async fn close(self) -> Result<(), BrokerError>;
}
