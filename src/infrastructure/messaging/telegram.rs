use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    application::services::messenger::{MessengerClient, ProviderReply},
    domain::models::{Button, MessageBody, OutboundMessage},
};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent("messaging-broadcast/telegram")
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn build_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<P: Serialize + ?Sized>(
        &self,
        method: &str,
        payload: &P,
    ) -> anyhow::Result<ProviderReply> {
        let response = self
            .http
            .post(self.build_url(method))
            .json(payload)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status().as_u16();
        let body: TelegramApiResponse = response.json().await.map_err(redact)?;
        debug!(method, status, ok = body.ok, description = ?body.description, "telegram reply");

        Ok(ProviderReply {
            status,
            ok: body.ok,
            description: body.description,
            error_code: body.error_code,
        })
    }
}

/// Request URLs embed the bot token, so they never make it into error text.
/// The source chain is kept and shows up when the error is printed with `{:#}`.
fn redact(err: reqwest::Error) -> anyhow::Error {
    anyhow::Error::new(err.without_url())
}

#[async_trait]
impl MessengerClient for TelegramClient {
    async fn send(
        &self,
        recipient: &str,
        message: &OutboundMessage,
    ) -> anyhow::Result<ProviderReply> {
        let reply_markup = InlineKeyboardMarkup::from_buttons(&message.buttons);
        let parse_mode = message.parse_mode.as_str();

        match &message.body {
            MessageBody::Text { text } => {
                let payload = SendMessagePayload {
                    chat_id: recipient,
                    text,
                    parse_mode,
                    reply_markup,
                };
                self.call("sendMessage", &payload).await
            }
            MessageBody::Photo { photo_url, caption } => {
                let payload = SendPhotoPayload {
                    chat_id: recipient,
                    photo: photo_url,
                    caption,
                    parse_mode,
                    reply_markup,
                };
                self.call("sendPhoto", &payload).await
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct SendPhotoPayload<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

impl<'a> InlineKeyboardMarkup<'a> {
    /// A single row, one link button per entry, in the given order.
    fn from_buttons(buttons: &'a [Button]) -> Option<Self> {
        if buttons.is_empty() {
            return None;
        }
        let row = buttons
            .iter()
            .map(|b| InlineKeyboardButton {
                text: &b.text,
                url: &b.url,
            })
            .collect();
        Some(Self {
            inline_keyboard: vec![row],
        })
    }
}

#[derive(Debug, Serialize)]
struct InlineKeyboardButton<'a> {
    text: &'a str,
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    description: Option<String>,
    error_code: Option<i64>,
}
