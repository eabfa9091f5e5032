use std::sync::Arc;

use poem::Body;
use poem_openapi::{OpenApi, param::Query, payload::PlainText};
use tracing::error;

use crate::{
    application::usecases::{ingest_events::IngestOutcome, verify_webhook::VerifyWebhookRequest},
    domain::models::WebhookEnvelope,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        requests::read_json_body,
        responses::{EVENT_RECEIVED, VerifyWebhookResponse, WebhookEventResponse},
    },
};

#[derive(Clone)]
pub struct WebhookEndpoints {
    state: Arc<ApiState>,
}

impl WebhookEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl WebhookEndpoints {
    /// Subscription handshake issued by the platform.
    #[oai(path = "/webhook", method = "get", tag = EndpointsTags::Webhook)]
    pub async fn verify(
        &self,
        #[oai(name = "hub.mode")] mode: Query<Option<String>>,
        #[oai(name = "hub.verify_token")] verify_token: Query<Option<String>>,
        #[oai(name = "hub.challenge")] challenge: Query<Option<String>>,
    ) -> VerifyWebhookResponse {
        let request = VerifyWebhookRequest {
            mode: mode.0,
            verify_token: verify_token.0,
            challenge: challenge.0,
        };

        match self.state.verify_webhook_usecase.execute(request) {
            Some(challenge) => VerifyWebhookResponse::Challenge(PlainText(challenge)),
            None => VerifyWebhookResponse::Forbidden,
        }
    }

    #[oai(path = "/webhook", method = "post", tag = EndpointsTags::Webhook)]
    pub async fn receive(&self, body: Body) -> WebhookEventResponse {
        let envelope = WebhookEnvelope::from_value(&read_json_body(body).await);

        match self.state.ingest_events_usecase.execute(&envelope).await {
            Ok(IngestOutcome::Processed(_)) => {
                WebhookEventResponse::Received(PlainText(EVENT_RECEIVED.to_string()))
            }
            Ok(IngestOutcome::Ignored) => WebhookEventResponse::NotFound,
            Err(err) => {
                error!(error = ?err, "webhook processing failed");
                WebhookEventResponse::InternalError
            }
        }
    }
}
