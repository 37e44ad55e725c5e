use crate::{
    application::{
        services::progress::ProgressEvent,
        usecases::start_broadcast::{BroadcastHandle, StartBroadcastRequest},
    },
    domain::models::{Button, ErrorCategory},
    presentation::{
        http::{
            requests::BroadcastRequestDto,
            responses::{BroadcastAcceptedDto, ErrorCategoryDto, ProgressEventDto},
        },
        models::ProgressEventKind,
    },
};

pub fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl From<BroadcastRequestDto> for StartBroadcastRequest {
    fn from(value: BroadcastRequestDto) -> Self {
        StartBroadcastRequest {
            message: value.message.unwrap_or_default(),
            image_url: value.image_url,
            buttons: value
                .buttons
                .into_iter()
                .map(|b| Button {
                    text: b.text,
                    url: b.url,
                })
                .collect(),
            parse_mode: value.parse_mode.into(),
            users: value.users.unwrap_or_default(),
        }
    }
}

pub fn map_progress_event(event: ProgressEvent) -> ProgressEventDto {
    match event {
        ProgressEvent::Progress(snapshot) => ProgressEventDto {
            event: ProgressEventKind::Progress,
            successful: Some(count(snapshot.successful)),
            failed: Some(count(snapshot.failed)),
            total_processed: Some(count(snapshot.total_processed)),
            total_users: Some(count(snapshot.total_users)),
            failed_ids: Some(snapshot.failed_ids()),
            processed_batches: Some(count(snapshot.processed_batches)),
            total_batches: Some(count(snapshot.total_batches)),
            error: None,
        },
        ProgressEvent::Failed { error } => ProgressEventDto {
            event: ProgressEventKind::Failed,
            successful: None,
            failed: None,
            total_processed: None,
            total_users: None,
            failed_ids: None,
            processed_batches: None,
            total_batches: None,
            error: Some(error),
        },
    }
}

pub fn map_accepted(handle: &BroadcastHandle) -> BroadcastAcceptedDto {
    BroadcastAcceptedDto {
        success: true,
        message: "Broadcast started".to_string(),
        job_id: handle.job_id,
        total_users: count(handle.total_users),
        total_batches: count(handle.total_batches),
        started_at: handle.started_at,
    }
}

pub fn map_category(category: ErrorCategory) -> ErrorCategoryDto {
    ErrorCategoryDto {
        error_message: category.error_message,
        user_ids: category.recipients,
    }
}
