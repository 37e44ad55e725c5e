use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::usecases::start_broadcast::StartBroadcastUseCase;

#[derive(Clone)]
pub struct ApiState {
    pub start_broadcast_usecase: Arc<StartBroadcastUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Broadcast,
    Recipients,
}
