use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{
    OpenApi,
    payload::{Json, PlainText},
};
use tracing::error;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    responses::StatusDto,
};

#[derive(Clone)]
pub struct HealthEndpoints {
    state: Arc<ApiState>,
}

impl HealthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl HealthEndpoints {
    #[oai(path = "/", method = "get", tag = EndpointsTags::Health)]
    pub async fn liveness(&self) -> PlainText<&'static str> {
        PlainText("OK")
    }

    /// Reports which secrets are configured, never their values.
    #[oai(path = "/status", method = "get", tag = EndpointsTags::Health)]
    pub async fn status(&self) -> poem::Result<Json<StatusDto>> {
        let recipient_count = self.state.recipients.count().await.map_err(|err| {
            error!(error = ?err, "failed to count recipients");
            poem::Error::from_status(StatusCode::INTERNAL_SERVER_ERROR)
        })?;

        Ok(Json(StatusDto {
            ok: true,
            has_access_token: self.state.has_access_token,
            has_verify_token: self.state.has_verify_token,
            recipient_count: recipient_count as u64,
        }))
    }
}
