use poem_openapi::{
    ApiResponse, Object,
    payload::{Json, PlainText},
};
use serde_json::Value;

pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";
pub const INTERNAL_ERROR: &str = "internal_error";

#[derive(Object, Debug)]
pub struct ErrorDto {
    pub error: String,
    #[oai(skip_serializing_if_is_none)]
    pub hint: Option<String>,
}

impl ErrorDto {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct StatusDto {
    pub ok: bool,
    pub has_access_token: bool,
    pub has_verify_token: bool,
    pub recipient_count: u64,
}

#[derive(Object)]
pub struct DeliveryResultDto {
    pub psid: String,
    /// Raw Send API response for this recipient.
    pub result: Value,
}

#[derive(Object)]
pub struct NotifyResponseDto {
    pub ok: bool,
    pub sent: u32,
    pub results: Vec<DeliveryResultDto>,
}

#[derive(ApiResponse)]
pub enum VerifyWebhookResponse {
    #[oai(status = 200)]
    Challenge(PlainText<String>),
    #[oai(status = 403)]
    Forbidden,
}

#[derive(ApiResponse)]
pub enum WebhookEventResponse {
    #[oai(status = 200)]
    Received(PlainText<String>),
    #[oai(status = 404)]
    NotFound,
    #[oai(status = 500)]
    InternalError,
}

#[derive(ApiResponse)]
pub enum NotifyResponse {
    #[oai(status = 200)]
    Sent(Json<NotifyResponseDto>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorDto>),
    #[oai(status = 500)]
    InternalError(Json<ErrorDto>),
}
