use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    application::services::{
        messenger::MessengerClient,
        outcome_classifier::classify,
        progress::{ProgressEvent, ProgressPublisher},
    },
    domain::models::{BroadcastJob, OutboundMessage, ProgressSnapshot, SendOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub batch_size: usize,
    /// Delay step between consecutive sends inside one batch.
    pub stagger: Duration,
    /// Pause after a batch's progress is published, before the next batch starts.
    pub batch_pause: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 25,
            stagger: Duration::from_millis(50),
            batch_pause: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReport {
    Completed(ProgressSnapshot),
    /// The consumer went away; batches after the snapshot were never sent.
    Abandoned(ProgressSnapshot),
}

impl DispatchReport {
    pub fn snapshot(&self) -> &ProgressSnapshot {
        match self {
            DispatchReport::Completed(snapshot) | DispatchReport::Abandoned(snapshot) => snapshot,
        }
    }
}

pub struct BroadcastDispatcher {
    client: Arc<dyn MessengerClient>,
    config: DispatchConfig,
}

impl BroadcastDispatcher {
    pub fn new(client: Arc<dyn MessengerClient>, mut config: DispatchConfig) -> Self {
        config.batch_size = config.batch_size.max(1);
        Self { client, config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Sends `job` batch by batch, publishing one snapshot per completed batch.
    ///
    /// Batches never overlap: a batch starts only after every send of the
    /// previous one has resolved and the pause has elapsed. Counters are only
    /// touched here, after a batch's sends have all been joined.
    pub async fn dispatch(
        &self,
        job: &BroadcastJob,
        progress: &ProgressPublisher,
    ) -> DispatchReport {
        let total_batches = job.total_batches(self.config.batch_size);
        let mut snapshot = ProgressSnapshot::new(job.recipients().len(), total_batches);

        for (index, batch) in job.recipients().chunks(self.config.batch_size).enumerate() {
            let outcomes = self.send_batch(job.message(), batch).await;
            snapshot.record_batch(outcomes);

            info!(
                batch = index + 1,
                total_batches,
                successful = snapshot.successful,
                failed = snapshot.failed,
                "batch processed"
            );

            if progress
                .publish(ProgressEvent::Progress(snapshot.clone()))
                .await
                .is_err()
            {
                info!(batch = index + 1, "progress consumer disconnected, stopping");
                return DispatchReport::Abandoned(snapshot);
            }

            if index + 1 < total_batches {
                tokio::select! {
                    _ = sleep(self.config.batch_pause) => {}
                    _ = progress.closed() => {
                        info!(batch = index + 1, "progress consumer disconnected, stopping");
                        return DispatchReport::Abandoned(snapshot);
                    }
                }
            }
        }

        DispatchReport::Completed(snapshot)
    }

    async fn send_batch(&self, message: &OutboundMessage, batch: &[String]) -> Vec<SendOutcome> {
        let sends = batch.iter().enumerate().map(|(position, recipient)| {
            let delay = self.stagger_for(position);
            async move {
                sleep(delay).await;
                let outcome = classify(recipient, self.client.send(recipient, message).await);
                if let Some(reason) = outcome.error() {
                    warn!(%recipient, %reason, "delivery failed");
                }
                outcome
            }
        });
        join_all(sends).await
    }

    fn stagger_for(&self, position: usize) -> Duration {
        let position = u32::try_from(position).unwrap_or(u32::MAX);
        self.config.stagger.saturating_mul(position)
    }
}
