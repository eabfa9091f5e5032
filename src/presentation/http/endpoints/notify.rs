use std::sync::Arc;

use poem::Body;
use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::{map_notify_error, map_notify_request, map_report},
    requests::{NotifyRequestDto, read_json_body},
    responses::NotifyResponse,
};

#[derive(Clone)]
pub struct NotifyEndpoints {
    state: Arc<ApiState>,
}

impl NotifyEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl NotifyEndpoints {
    /// Sends a text alert to one PSID or to every captured recipient.
    ///
    /// Body: `{"text": "...", "psid": "optional", "tag": "optional"}`.
    #[oai(path = "/notify", method = "post", tag = EndpointsTags::Notify)]
    pub async fn notify(&self, body: Body) -> NotifyResponse {
        let request = NotifyRequestDto::from_value(&read_json_body(body).await);

        match self
            .state
            .notify_usecase
            .execute(map_notify_request(request))
            .await
        {
            Ok(report) => NotifyResponse::Sent(Json(map_report(report))),
            Err(err) => map_notify_error(err),
        }
    }
}
