use std::sync::Arc;

use poem_openapi::{OpenApiService, Tags};

use crate::{
    application::usecases::{
        ingest_events::IngestEventsUseCase, notify_recipients::NotifyRecipientsUseCase,
        verify_webhook::VerifyWebhookUseCase,
    },
    domain::repositories::RecipientRepository,
    presentation::http::endpoints::{
        health::HealthEndpoints, notify::NotifyEndpoints, webhook::WebhookEndpoints,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub verify_webhook_usecase: Arc<VerifyWebhookUseCase>,
    pub ingest_events_usecase: Arc<IngestEventsUseCase>,
    pub notify_usecase: Arc<NotifyRecipientsUseCase>,
    pub recipients: Arc<dyn RecipientRepository>,
    pub has_access_token: bool,
    pub has_verify_token: bool,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Webhook,
    Notify,
}

pub type Endpoints = (HealthEndpoints, WebhookEndpoints, NotifyEndpoints);

pub fn api_service(state: Arc<ApiState>) -> OpenApiService<Endpoints, ()> {
    let endpoints = (
        HealthEndpoints::new(state.clone()),
        WebhookEndpoints::new(state.clone()),
        NotifyEndpoints::new(state),
    );
    OpenApiService::new(endpoints, "Messenger Relay API", env!("CARGO_PKG_VERSION"))
}
