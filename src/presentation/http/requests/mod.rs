use poem_openapi::Object;

use crate::presentation::models::{ParseModeKind, RecipientListFormatKind};

#[derive(Object, Debug, Clone)]
pub struct ButtonDto {
    pub text: String,
    pub url: String,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct BroadcastRequestDto {
    /// Missing values fall through to domain validation so the error body stays JSON.
    pub message: Option<String>,
    pub image_url: Option<String>,
    #[oai(default)]
    pub buttons: Vec<ButtonDto>,
    pub users: Option<Vec<String>>,
    #[oai(default)]
    pub parse_mode: ParseModeKind,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct CategorizeErrorsRequestDto {
    pub failed_ids: Vec<String>,
}

#[derive(Object, Debug)]
pub struct ParseRecipientsRequestDto {
    pub format: RecipientListFormatKind,
    pub content: String,
}
