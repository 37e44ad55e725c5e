#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Markdown,
    Html,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Markdown => "Markdown",
            ParseMode::Html => "HTML",
        }
    }
}

/// What the recipient sees. The photo variant carries the message text as caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text { text: String },
    Photo { photo_url: String, caption: String },
}

impl MessageBody {
    /// Picks the photo variant when an image URL is supplied and not blank.
    pub fn from_parts(text: String, image_url: Option<String>) -> Self {
        match image_url.filter(|url| !url.trim().is_empty()) {
            Some(photo_url) => MessageBody::Photo {
                photo_url,
                caption: text,
            },
            None => MessageBody::Text { text },
        }
    }

    pub fn text(&self) -> &str {
        match self {
            MessageBody::Text { text } => text,
            MessageBody::Photo { caption, .. } => caption,
        }
    }
}

/// Recipient-independent payload shared by every send of a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub body: MessageBody,
    pub buttons: Vec<Button>,
    pub parse_mode: ParseMode,
}
