use async_trait::async_trait;

use crate::domain::models::OutboundMessage;

/// Raw provider answer for one send, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub ok: bool,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl ProviderReply {
    pub fn accepted() -> Self {
        Self {
            status: 200,
            ok: true,
            description: None,
            error_code: None,
        }
    }

    pub fn rejected(status: u16, error_code: Option<i64>, description: Option<&str>) -> Self {
        Self {
            status,
            ok: false,
            description: description.map(str::to_string),
            error_code,
        }
    }
}

/// Seam between the dispatcher and a concrete messaging provider.
///
/// `Err` means the request never produced a decodable reply (network failure,
/// timeout, malformed body). Provider-side rejections come back as `Ok` with
/// `ok == false`.
#[async_trait]
pub trait MessengerClient: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        message: &OutboundMessage,
    ) -> anyhow::Result<ProviderReply>;
}
