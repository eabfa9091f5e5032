use std::{io::Error, sync::Arc};

use poem::{EndpointExt, Route, Server, listener::TcpListener, middleware::Tracing};
use tokio::main;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    application::usecases::{
        ingest_events::IngestEventsUseCase, notify_recipients::NotifyRecipientsUseCase,
        verify_webhook::VerifyWebhookUseCase,
    },
    config::Config,
    domain::repositories::RecipientRepository,
    infrastructure::{
        messaging::graph::GraphMessengerClient,
        repositories::in_memory::InMemoryRecipientRepository,
    },
    presentation::http::endpoints::root::{ApiState, api_service},
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    if config.page_access_token.is_none() {
        warn!("PAGE_ACCESS_TOKEN is not set; Send API calls will be rejected by the platform");
    }
    if config.verify_token.is_none() {
        warn!("VERIFY_TOKEN is not set; webhook verification will always fail");
    }

    let recipients: Arc<dyn RecipientRepository> = Arc::new(InMemoryRecipientRepository::new());
    let messenger = GraphMessengerClient::new(
        config.graph_api_base.clone(),
        config.graph_api_version.clone(),
        config.page_access_token.clone(),
    )
    .map_err(Error::other)?;

    let state = Arc::new(ApiState {
        verify_webhook_usecase: Arc::new(VerifyWebhookUseCase::new(config.verify_token.clone())),
        ingest_events_usecase: Arc::new(IngestEventsUseCase::new(
            recipients.clone(),
            messenger.clone(),
            config.auto_reply(),
        )),
        notify_usecase: Arc::new(NotifyRecipientsUseCase::new(recipients.clone(), messenger)),
        recipients,
        has_access_token: config.page_access_token.is_some(),
        has_verify_token: config.verify_token.is_some(),
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!(addr = %bind_addr, "starting messenger relay");

    let api_service = api_service(state).server(format!("http://{}", bind_addr));
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/docs", ui)
        .nest("/", api_service)
        .with(Tracing);

    Server::new(TcpListener::bind(bind_addr)).run(app).await
}
