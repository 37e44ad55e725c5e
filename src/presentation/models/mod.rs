use poem_openapi::Enum;

use crate::domain::{models::ParseMode, value_objects::RecipientListFormat};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseModeKind {
    #[oai(rename = "Markdown")]
    Markdown,
    #[oai(rename = "HTML")]
    Html,
}

impl Default for ParseModeKind {
    fn default() -> Self {
        ParseModeKind::Markdown
    }
}

impl From<ParseModeKind> for ParseMode {
    fn from(value: ParseModeKind) -> Self {
        match value {
            ParseModeKind::Markdown => ParseMode::Markdown,
            ParseModeKind::Html => ParseMode::Html,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecipientListFormatKind {
    #[oai(rename = "lines")]
    Lines,
    #[oai(rename = "comma")]
    Comma,
}

impl From<RecipientListFormatKind> for RecipientListFormat {
    fn from(value: RecipientListFormatKind) -> Self {
        match value {
            RecipientListFormatKind::Lines => RecipientListFormat::Lines,
            RecipientListFormatKind::Comma => RecipientListFormat::Comma,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProgressEventKind {
    #[oai(rename = "progress")]
    Progress,
    #[oai(rename = "failed")]
    Failed,
}
