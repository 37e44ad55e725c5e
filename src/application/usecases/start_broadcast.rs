use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::{
    application::{
        handlers::broadcast_dispatcher::{BroadcastDispatcher, DispatchConfig, DispatchReport},
        services::{
            messenger::MessengerClient,
            progress::{ProgressEvent, ProgressPublisher, ProgressStream},
        },
    },
    domain::{
        errors::BroadcastError,
        models::{BroadcastJob, Button, MessageBody, ParseMode},
    },
};

pub struct StartBroadcastConfig {
    pub dispatch: DispatchConfig,
    pub progress_buffer: usize,
}

impl Default for StartBroadcastConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            progress_buffer: 16,
        }
    }
}

pub struct StartBroadcastRequest {
    pub message: String,
    pub image_url: Option<String>,
    pub buttons: Vec<Button>,
    pub parse_mode: ParseMode,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Streaming,
    Detached,
}

pub struct BroadcastHandle {
    pub job_id: Uuid,
    pub total_users: usize,
    pub total_batches: usize,
    pub started_at: DateTime<Utc>,
    /// Present only in streaming mode.
    pub progress: Option<ProgressStream>,
    pub task: JoinHandle<()>,
}

pub struct StartBroadcastUseCase {
    dispatcher: Option<Arc<BroadcastDispatcher>>,
    progress_buffer: usize,
}

impl StartBroadcastUseCase {
    /// `client` is `None` when no provider credential is configured; every
    /// submission then fails with a configuration error.
    pub fn new(client: Option<Arc<dyn MessengerClient>>, config: StartBroadcastConfig) -> Self {
        Self {
            dispatcher: client.map(|c| Arc::new(BroadcastDispatcher::new(c, config.dispatch))),
            progress_buffer: config.progress_buffer,
        }
    }

    /// Checks preconditions, then spawns the job. Nothing is sent and no
    /// progress is produced when this returns an error.
    pub fn execute(
        &self,
        request: StartBroadcastRequest,
        mode: ProgressMode,
    ) -> Result<BroadcastHandle, BroadcastError> {
        let dispatcher = self
            .dispatcher
            .clone()
            .ok_or_else(|| BroadcastError::configuration("Telegram bot token not configured"))?;

        let job = BroadcastJob::new(
            MessageBody::from_parts(request.message, request.image_url),
            request.buttons,
            request.parse_mode,
            request.users,
        )?;

        let job_id = Uuid::new_v4();
        let total_users = job.recipients().len();
        let total_batches = job.total_batches(dispatcher.config().batch_size);

        let (publisher, progress) = match mode {
            ProgressMode::Streaming => {
                let (publisher, stream) = ProgressPublisher::channel(self.progress_buffer);
                (publisher, Some(stream))
            }
            ProgressMode::Detached => (ProgressPublisher::detached(), None),
        };

        let span = info_span!("broadcast", %job_id);
        let task = tokio::spawn(run_job(dispatcher, job, publisher).instrument(span));

        Ok(BroadcastHandle {
            job_id,
            total_users,
            total_batches,
            started_at: Utc::now(),
            progress,
            task,
        })
    }
}

async fn run_job(
    dispatcher: Arc<BroadcastDispatcher>,
    job: BroadcastJob,
    progress: ProgressPublisher,
) {
    info!(users = job.recipients().len(), "broadcast started");

    let run = AssertUnwindSafe(dispatcher.dispatch(&job, &progress))
        .catch_unwind()
        .await;

    match run {
        Ok(DispatchReport::Completed(snapshot)) => info!(
            successful = snapshot.successful,
            failed = snapshot.failed,
            "broadcast completed"
        ),
        Ok(DispatchReport::Abandoned(snapshot)) => info!(
            processed = snapshot.total_processed,
            total = snapshot.total_users,
            "broadcast abandoned"
        ),
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!(%reason, "broadcast task panicked");
            let _ = progress
                .publish(ProgressEvent::Failed {
                    error: format!("Broadcast failed: {reason}"),
                })
                .await;
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown error".to_string()
    }
}
