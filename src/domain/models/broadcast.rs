use crate::domain::errors::BroadcastError;

use super::message::{Button, MessageBody, OutboundMessage, ParseMode};

pub const MAX_BUTTONS: usize = 3;

/// One submission: a message and the ordered list of recipients it goes to.
///
/// Only constructible through [`BroadcastJob::new`], so a job in hand has
/// already passed validation and cannot change once dispatch starts.
#[derive(Debug, Clone)]
pub struct BroadcastJob {
    message: OutboundMessage,
    recipients: Vec<String>,
}

impl BroadcastJob {
    pub fn new(
        body: MessageBody,
        buttons: Vec<Button>,
        parse_mode: ParseMode,
        recipients: Vec<String>,
    ) -> Result<Self, BroadcastError> {
        if body.text().trim().is_empty() || recipients.is_empty() {
            return Err(BroadcastError::validation("Message and users are required"));
        }

        if buttons.len() > MAX_BUTTONS {
            return Err(BroadcastError::validation(format!(
                "At most {MAX_BUTTONS} buttons are allowed, got {}",
                buttons.len()
            )));
        }

        if let Some(position) = buttons
            .iter()
            .position(|b| b.text.trim().is_empty() || b.url.trim().is_empty())
        {
            return Err(BroadcastError::validation(format!(
                "Button {} must have both text and url",
                position + 1
            )));
        }

        Ok(Self {
            message: OutboundMessage {
                body,
                buttons,
                parse_mode,
            },
            recipients,
        })
    }

    pub fn message(&self) -> &OutboundMessage {
        &self.message
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn total_batches(&self, batch_size: usize) -> usize {
        self.recipients.len().div_ceil(batch_size.max(1))
    }
}
