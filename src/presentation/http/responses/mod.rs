use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::ProgressEventKind;

/// One server-sent progress event. Counters are absent on a `failed` event.
#[derive(Object, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
pub struct ProgressEventDto {
    pub event: ProgressEventKind,
    #[oai(skip_serializing_if_is_none)]
    pub successful: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub failed: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub total_processed: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub total_users: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub failed_ids: Option<Vec<String>>,
    #[oai(skip_serializing_if_is_none)]
    pub processed_batches: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub total_batches: Option<u32>,
    #[oai(skip_serializing_if_is_none)]
    pub error: Option<String>,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct BroadcastAcceptedDto {
    pub success: bool,
    pub message: String,
    pub job_id: Uuid,
    pub total_users: u32,
    pub total_batches: u32,
    pub started_at: DateTime<Utc>,
}

#[derive(Object, Debug)]
pub struct BroadcastErrorDto {
    pub success: bool,
    pub error: String,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct ErrorCategoryDto {
    pub error_message: String,
    pub user_ids: Vec<String>,
}

#[derive(Object, Debug)]
pub struct CategorizeErrorsResponseDto {
    pub categories: Vec<ErrorCategoryDto>,
}

#[derive(Object, Debug)]
pub struct ParseRecipientsResponseDto {
    pub users: Vec<String>,
    pub count: u32,
}
