use std::sync::Arc;

use futures::{StreamExt, stream::BoxStream};
use poem_openapi::{
    ApiResponse, OpenApi,
    param::Header,
    payload::{EventStream, Json},
};
use tracing::warn;

use crate::{
    application::{
        services::error_categories::categorize_lines,
        usecases::start_broadcast::ProgressMode,
    },
    domain::errors::BroadcastError,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{map_accepted, map_category, map_progress_event},
        requests::{BroadcastRequestDto, CategorizeErrorsRequestDto},
        responses::{
            BroadcastAcceptedDto, BroadcastErrorDto, CategorizeErrorsResponseDto, ProgressEventDto,
        },
    },
};

const EVENT_STREAM: &str = "text/event-stream";

#[derive(ApiResponse)]
pub enum BroadcastResponse {
    /// Progress events, one per completed batch, then the stream closes.
    #[oai(status = 200)]
    Progress(EventStream<BoxStream<'static, ProgressEventDto>>),
    /// Accepted without progress reporting; the job runs on its own.
    #[oai(status = 200)]
    Accepted(Json<BroadcastAcceptedDto>),
    /// Missing message or users, or malformed buttons.
    #[oai(status = 400)]
    BadRequest(Json<BroadcastErrorDto>),
    /// Provider credential missing or unexpected failure.
    #[oai(status = 500)]
    InternalError(Json<BroadcastErrorDto>),
}

#[derive(Clone)]
pub struct BroadcastEndpoints {
    state: Arc<ApiState>,
}

impl BroadcastEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl BroadcastEndpoints {
    /// Starts a broadcast. Send `Accept: text/event-stream` to follow its progress.
    #[oai(path = "/broadcast", method = "post", tag = EndpointsTags::Broadcast)]
    pub async fn broadcast(
        &self,
        #[oai(name = "Accept")] accept: Header<Option<String>>,
        request: Json<BroadcastRequestDto>,
    ) -> BroadcastResponse {
        let mode = if accept.0.as_deref().is_some_and(|v| v.contains(EVENT_STREAM)) {
            ProgressMode::Streaming
        } else {
            ProgressMode::Detached
        };

        let handle = match self
            .state
            .start_broadcast_usecase
            .execute(request.0.into(), mode)
        {
            Ok(handle) => handle,
            Err(err) => return error_response(err),
        };

        match handle.progress {
            Some(stream) => {
                BroadcastResponse::Progress(EventStream::new(stream.map(map_progress_event).boxed()))
            }
            None => BroadcastResponse::Accepted(Json(map_accepted(&handle))),
        }
    }

    /// Groups `"<id>: <error>"` failure strings by error message.
    #[oai(
        path = "/broadcast/errors/categorize",
        method = "post",
        tag = EndpointsTags::Broadcast,
    )]
    pub async fn categorize_errors(
        &self,
        request: Json<CategorizeErrorsRequestDto>,
    ) -> Json<CategorizeErrorsResponseDto> {
        let categories = categorize_lines(&request.failed_ids);
        Json(CategorizeErrorsResponseDto {
            categories: categories.into_iter().map(map_category).collect(),
        })
    }
}

fn error_response(err: BroadcastError) -> BroadcastResponse {
    let body = |error: String| {
        Json(BroadcastErrorDto {
            success: false,
            error,
        })
    };
    match err {
        BroadcastError::Validation(reason) => BroadcastResponse::BadRequest(body(reason)),
        BroadcastError::Configuration(reason) => {
            warn!(error = %reason, "broadcast rejected");
            BroadcastResponse::InternalError(body(reason))
        }
    }
}
