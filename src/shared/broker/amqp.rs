use crate::features::publish::Message;
use crate::shared::error::BrokerError;
use crate::shared::traits::{BrokerConnection, MessageBroker, TransactedSession};
use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties,
};
use log::debug;

const REPLY_SUCCESS: u16 = 200;

/// AMQP 0-9-1 broker reached through `lapin`. Each `connect` opens a fresh
/// TCP connection.
pub struct AmqpBroker {
    url: String,
}

impl AmqpBroker {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl MessageBroker for AmqpBroker {
    type Connection = AmqpConnection;

    async fn connect(&self) -> Result<AmqpConnection, BrokerError> {
        let connection = Connection::connect(&self.url, ConnectionProperties::default())
            .await
            .map_err(|e| BrokerError::Connection(format!("Failed to connect to broker: {}", e)))?;
        debug!("Connected to AMQP broker");
        Ok(AmqpConnection { connection })
    }
}

pub struct AmqpConnection {
    connection: Connection,
}

#[async_trait]
impl BrokerConnection for AmqpConnection {
    type Session = AmqpSession;

    async fn open_session(&mut self) -> Result<AmqpSession, BrokerError> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(|e| BrokerError::Channel(format!("Failed to create channel: {}", e)))?;

        if let Err(e) = channel.tx_select().await {
            let _ = channel.close(REPLY_SUCCESS, "tx.select failed").await;
            return Err(BrokerError::Transaction(format!(
                "Failed to enable transactions: {}",
                e
            )));
        }

        debug!("Opened transacted channel {}", channel.id());
        Ok(AmqpSession { channel })
    }

    async fn close(self) -> Result<(), BrokerError> {
        self.connection
            .close(REPLY_SUCCESS, "OK")
            .await
            .map_err(|e| BrokerError::Connection(format!("Failed to close connection: {}", e)))
    }
}

fn properties(message: &Message) -> BasicProperties {
    BasicProperties::default()
        .with_content_type("text/plain".into())
        .with_delivery_mode(message.delivery_mode.as_amqp())
}

pub struct AmqpSession {
    channel: Channel,
}

#[async_trait]
impl TransactedSession for AmqpSession {
    async fn declare_queue(&mut self, queue: &str) -> Result<(), BrokerError> {
        self.channel
            .queue_declare(queue, QueueDeclareOptions::default(), FieldTable::default())
            .await
            .map_err(|e| BrokerError::Channel(format!("Failed to declare queue {}: {}", queue, e)))?;
        Ok(())
    }

    /// Publishes through the default exchange, routed by queue name.
    async fn send(&mut self, queue: &str, message: &Message) -> Result<(), BrokerError> {
        self.channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                message.body.as_bytes(),
                properties(message),
            )
            .await
            .map_err(|e| BrokerError::Channel(format!("Failed to publish message: {}", e)))?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BrokerError> {
        self.channel
            .tx_commit()
            .await
            .map_err(|e| BrokerError::Transaction(format!("Failed to commit: {}", e)))
    }

    async fn rollback(&mut self) -> Result<(), BrokerError> {
        self.channel
            .tx_rollback()
            .await
            .map_err(|e| BrokerError::Transaction(format!("Failed to roll back: {}", e)))
    }

    async fn close(self) -> Result<(), BrokerError> {
        self.channel
            .close(REPLY_SUCCESS, "OK")
            .await
            .map_err(|e| BrokerError::Channel(format!("Failed to close channel: {}", e)))
    }
}
