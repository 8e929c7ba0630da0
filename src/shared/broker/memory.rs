use crate::features::publish::Message;
use crate::shared::error::BrokerError;
use crate::shared::traits::{BrokerConnection, MessageBroker, TransactedSession};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A broker operation that a `MemoryBroker` can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Connect,
    OpenSession,
    DeclareQueue,
    /// Fails the send issued after `after` successful sends in a session.
    Send { after: usize },
    Commit,
    Rollback,
    Close,
}

impl FailurePoint {
    pub fn error(self) -> BrokerError {
        match self {
            FailurePoint::Connect => BrokerError::Connection("connection refused".to_string()),
            FailurePoint::OpenSession => BrokerError::Channel("session refused".to_string()),
            FailurePoint::DeclareQueue => BrokerError::Channel("queue declare refused".to_string()),
            FailurePoint::Send { after } => {
                BrokerError::Channel(format!("send refused after {} messages", after))
            }
            FailurePoint::Commit => BrokerError::Transaction("commit refused".to_string()),
            FailurePoint::Rollback => BrokerError::Transaction("rollback refused".to_string()),
            FailurePoint::Close => BrokerError::Channel("close refused".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub connections_opened: usize,
    pub connections_closed: usize,
    pub sessions_opened: usize,
    pub sessions_closed: usize,
    pub commits: usize,
    pub rollbacks: usize,
}

#[derive(Debug, Default)]
struct MemoryState {
    queues: HashMap<String, Vec<Message>>,
    failures: Vec<FailurePoint>,
    stats: MemoryStats,
}

impl MemoryState {
    fn check(&self, point: FailurePoint) -> Result<(), BrokerError> {
        if self.failures.contains(&point) {
            Err(point.error())
        } else {
            Ok(())
        }
    }
}

/// In-process broker. Clones share state, so a handle kept outside a
/// publisher sees what was committed through it.
#[derive(Debug, Clone, Default)]
pub struct MemoryBroker {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self::new().fail_at(FailurePoint::Connect)
    }

    pub fn fail_at(self, point: FailurePoint) -> Self {
        lock(&self.state).failures.push(point);
        self
    }

    /// Messages visible to consumers of `queue`.
    pub fn committed(&self, queue: &str) -> Vec<Message> {
        lock(&self.state)
            .queues
            .get(queue)
            .cloned()
            .unwrap_or_default()
    }

    pub fn stats(&self) -> MemoryStats {
        lock(&self.state).stats
    }
}

fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl MessageBroker for MemoryBroker {
    type Connection = MemoryConnection;

    async fn connect(&self) -> Result<MemoryConnection, BrokerError> {
        let mut state = lock(&self.state);
        state.check(FailurePoint::Connect)?;
        state.stats.connections_opened += 1;
        Ok(MemoryConnection {
            state: Arc::clone(&self.state),
        })
    }
}

pub struct MemoryConnection {
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl BrokerConnection for MemoryConnection {
    type Session = MemorySession;

    async fn open_session(&mut self) -> Result<MemorySession, BrokerError> {
        let mut state = lock(&self.state);
        state.check(FailurePoint::OpenSession)?;
        state.stats.sessions_opened += 1;
        Ok(MemorySession {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
            sent: 0,
        })
    }

    async fn close(self) -> Result<(), BrokerError> {
        let mut state = lock(&self.state);
        state.stats.connections_closed += 1;
        state.check(FailurePoint::Close)
    }
}

pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
    pending: Vec<(String, Message)>,
    sent: usize,
}

#[async_trait]
impl TransactedSession for MemorySession {
    async fn declare_queue(&mut self, queue: &str) -> Result<(), BrokerError> {
        let mut state = lock(&self.state);
        state.check(FailurePoint::DeclareQueue)?;
        state.queues.entry(queue.to_string()).or_default();
        Ok(())
    }

    async fn send(&mut self, queue: &str, message: &Message) -> Result<(), BrokerError> {
        lock(&self.state).check(FailurePoint::Send { after: self.sent })?;
        self.pending.push((queue.to_string(), message.clone()));
        self.sent += 1;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), BrokerError> {
        let mut state = lock(&self.state);
        state.check(FailurePoint::Commit)?;
        for (queue, message) in self.pending.drain(..) {
            state.queues.entry(queue).or_default().push(message);
        }
        state.stats.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), BrokerError> {
        self.pending.clear();
        let mut state = lock(&self.state);
        state.check(FailurePoint::Rollback)?;
        state.stats.rollbacks += 1;
        Ok(())
    }

    async fn close(self) -> Result<(), BrokerError> {
        let mut state = lock(&self.state);
        state.stats.sessions_closed += 1;
        state.check(FailurePoint::Close)
    }
}
