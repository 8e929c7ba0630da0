use crate::features::publish::models::{Message, PublishOutcome, PublishStage};
use crate::features::spool::ContentTable;
use crate::shared::error::BrokerError;
use crate::shared::traits::{BrokerConnection, MessageBroker, TransactedSession};
use log::{debug, info};

/// Publishes a content table as one transaction per call.
///
/// The connection and session live only for the duration of `publish`. Every
/// path out of it closes whatever was opened, and a failure after the session
/// opens triggers a rollback first.
pub struct Publisher<B> {
    broker: B,
    queue: String,
}

impl<B: MessageBroker> Publisher<B> {
    pub fn new(broker: B, queue: impl Into<String>) -> Self {
        Self {
            broker,
            queue: queue.into(),
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub async fn publish(&self, table: &ContentTable) -> PublishOutcome {
        let messages: Vec<Message> = table.lines().map(Message::text).collect();
        if messages.is_empty() {
            debug!("No lines to publish to {}", self.queue);
            return PublishOutcome::NothingToPublish;
        }

        let mut connection = match self.broker.connect().await {
            Ok(connection) => connection,
            Err(e) => return failed(PublishStage::Connect, e, false),
        };

        let outcome = match connection.open_session().await {
            Ok(mut session) => {
                let outcome = match self.send_all(&mut session, &messages).await {
                    Ok(()) => {
                        info!("Committed {} messages to {}", messages.len(), self.queue);
                        PublishOutcome::Published {
                            messages: messages.len(),
                        }
                    }
                    Err((stage, e)) => {
                        let rolled_back = match session.rollback().await {
                            Ok(()) => true,
                            Err(rollback_error) => {
                                debug!("Ignoring rollback failure: {}", rollback_error);
                                false
                            }
                        };
                        failed(stage, e, rolled_back)
                    }
                };
                if let Err(e) = session.close().await {
                    debug!("Ignoring session close failure: {}", e);
                }
                outcome
            }
            Err(e) => failed(PublishStage::Session, e, false),
        };

        if let Err(e) = connection.close().await {
            debug!("Ignoring connection close failure: {}", e);
        }

        outcome
    }

    async fn send_all<S: TransactedSession>(
        &self,
        session: &mut S,
        messages: &[Message],
    ) -> Result<(), (PublishStage, BrokerError)> {
        session
            .declare_queue(&self.queue)
            .await
            .map_err(|e| (PublishStage::Produce, e))?;

        for message in messages {
            session
                .send(&self.queue, message)
                .await
                .map_err(|e| (PublishStage::Send, e))?;
        }

        session
            .commit()
            .await
            .map_err(|e| (PublishStage::Commit, e))
    }
}

fn failed(stage: PublishStage, error: BrokerError, rolled_back: bool) -> PublishOutcome {
    PublishOutcome::Failed {
        stage,
        reason: error.to_string(),
        rolled_back,
    }
}
