use crate::features::publish::{PublishOutcome, Publisher};
use crate::features::relocate::Relocator;
use crate::features::report::ConsoleReporter;
use crate::features::spool::SpoolCollector;
use crate::shared::config::{Config, FsErrorPolicy};
use crate::shared::error::SpoolError;
use crate::shared::traits::{MessageBroker, Trigger};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    pub files: usize,
    pub lines: usize,
    pub relocated: Vec<PathBuf>,
    pub outcome: PublishOutcome,
}

/// One pass is list, filter, load, move, print, publish. Content is fully
/// loaded before anything is moved.
pub struct Pipeline<B, W> {
    collector: SpoolCollector,
    relocator: Relocator,
    reporter: ConsoleReporter,
    publisher: Publisher<B>,
    out: W,
}

impl<B: MessageBroker, W: Write> Pipeline<B, W> {
    pub fn new(config: &Config, broker: B, out: W) -> Self {
        Self {
            collector: SpoolCollector::new(&config.source_dir, config.suffix.clone()),
            relocator: Relocator::new(&config.target_dir),
            reporter: ConsoleReporter::new(),
            publisher: Publisher::new(broker, config.broker.queue.clone()),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run_iteration(&mut self) -> Result<IterationReport, SpoolError> {
        let paths = self.collector.scan()?;
        let table = self.collector.load(&paths)?;
        let relocated = self.relocator.relocate(&paths, &mut self.out)?;
        self.reporter.report(&table, &mut self.out)?;

        let outcome = self.publisher.publish(&table).await;
        if let PublishOutcome::Failed { .. } = outcome {
            warn!("Publishing to {} {}", self.publisher.queue(), outcome);
        }

        Ok(IterationReport {
            files: table.len(),
            lines: table.line_count(),
            relocated,
            outcome,
        })
    }

    /// Runs until a filesystem fault stops it under `FsErrorPolicy::Abort`.
    pub async fn run<T: Trigger>(
        &mut self,
        trigger: &mut T,
        policy: FsErrorPolicy,
    ) -> Result<(), SpoolError> {
        loop {
            match self.run_iteration().await {
                Ok(report) if report.files > 0 => info!(
                    "Processed {} files, {} lines: {}",
                    report.files, report.lines, report.outcome
                ),
                Ok(_) => debug!(
                    "Nothing to process in {}",
                    self.collector.source_dir().display()
                ),
                Err(e) => match policy {
                    FsErrorPolicy::Abort => return Err(e),
                    FsErrorPolicy::Continue => error!("Iteration failed: {}", e),
                },
            }

            trigger.wait().await;
        }
    }
}
