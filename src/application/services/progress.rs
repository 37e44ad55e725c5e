use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use crate::domain::models::ProgressSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Progress(ProgressSnapshot),
    /// Terminal: the job stopped for a reason other than a recipient failure.
    Failed { error: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("progress consumer is gone")]
pub struct ConsumerGone;

pub type ProgressStream = ReceiverStream<ProgressEvent>;

/// Producer half of the progress channel.
///
/// The stream ends once every publisher clone has been dropped, which happens
/// when the job task finishes. A detached publisher has no consumer at all and
/// only logs what it is given.
#[derive(Clone, Debug)]
pub struct ProgressPublisher {
    tx: Option<mpsc::Sender<ProgressEvent>>,
}

impl ProgressPublisher {
    pub fn channel(capacity: usize) -> (Self, ProgressStream) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, ReceiverStream::new(rx))
    }

    pub fn detached() -> Self {
        Self { tx: None }
    }

    pub async fn publish(&self, event: ProgressEvent) -> Result<(), ConsumerGone> {
        match &self.tx {
            Some(tx) => tx.send(event).await.map_err(|_| ConsumerGone),
            None => {
                match event {
                    ProgressEvent::Progress(snapshot) => debug!(
                        processed_batches = snapshot.processed_batches,
                        total_batches = snapshot.total_batches,
                        "progress without consumer"
                    ),
                    ProgressEvent::Failed { error } => error!(%error, "job failed without consumer"),
                }
                Ok(())
            }
        }
    }

    /// Resolves once the consumer has dropped its stream. Never resolves for a
    /// detached publisher.
    pub async fn closed(&self) {
        match &self.tx {
            Some(tx) => tx.closed().await,
            None => std::future::pending().await,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| tx.is_closed())
    }
}
