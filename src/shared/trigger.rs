use crate::shared::traits::Trigger;
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

pub struct FixedDelay {
    period: Duration,
}

impl FixedDelay {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

#[async_trait]
impl Trigger for FixedDelay {
    async fn wait(&mut self) {
        debug!("Sleeping {:?} before next iteration", self.period);
        tokio::time::sleep(self.period).await;
    }
}
