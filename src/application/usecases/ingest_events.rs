use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::services::messenger::MessengerClient,
    domain::{
        models::{OutboundMessage, WebhookEnvelope},
        repositories::RecipientRepository,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub events: usize,
    pub senders: usize,
    pub registered: usize,
    pub replies_failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Not a page subscription; nothing was touched.
    Ignored,
    Processed(IngestSummary),
}

pub struct IngestEventsUseCase {
    repo: Arc<dyn RecipientRepository>,
    messenger: Arc<dyn MessengerClient>,
    auto_reply: Option<String>,
}

impl IngestEventsUseCase {
    pub fn new(
        repo: Arc<dyn RecipientRepository>,
        messenger: Arc<dyn MessengerClient>,
        auto_reply: Option<String>,
    ) -> Self {
        Self {
            repo,
            messenger,
            auto_reply,
        }
    }

    /// Registers every sender in the envelope and acknowledges each one.
    ///
    /// A failed acknowledgment only affects its own event. A registry failure
    /// aborts the whole delivery.
    pub async fn execute(&self, envelope: &WebhookEnvelope) -> anyhow::Result<IngestOutcome> {
        if !envelope.is_page() {
            warn!(
                object = envelope.object.as_deref().unwrap_or("<missing>"),
                "ignoring webhook for non-page object"
            );
            return Ok(IngestOutcome::Ignored);
        }

        let mut summary = IngestSummary::default();
        for event in envelope.events() {
            summary.events += 1;
            let Some(sender) = event.sender_id() else {
                continue;
            };
            summary.senders += 1;

            if self.repo.add(sender).await? {
                summary.registered += 1;
                info!(
                    psid = %sender,
                    page = event.recipient.as_deref().unwrap_or("<unknown>"),
                    "captured psid"
                );
            }

            let Some(text) = &self.auto_reply else {
                continue;
            };
            // Replying inside the window opened by this very event.
            let reply = OutboundMessage::response(sender, text.clone());
            if let Err(err) = self.messenger.send(&reply).await {
                summary.replies_failed += 1;
                warn!(psid = %sender, error = %err, "auto-reply failed");
            }
        }

        info!(
            events = summary.events,
            senders = summary.senders,
            registered = summary.registered,
            replies_failed = summary.replies_failed,
            "webhook processed"
        );
        Ok(IngestOutcome::Processed(summary))
    }
}
