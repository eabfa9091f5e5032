use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::{
    application::services::messenger::MessengerClient,
    domain::{
        errors::NotifyError,
        models::{Delivery, OutboundMessage},
        repositories::RecipientRepository,
    },
};

pub struct NotifyRecipientsUseCase {
    repo: Arc<dyn RecipientRepository>,
    messenger: Arc<dyn MessengerClient>,
}

#[derive(Debug, Default)]
pub struct NotifyRequest {
    pub text: Option<String>,
    pub psid: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug)]
pub struct DeliveryResult {
    pub psid: String,
    pub result: Value,
}

#[derive(Debug)]
pub struct NotifyReport {
    pub results: Vec<DeliveryResult>,
}

impl NotifyRecipientsUseCase {
    pub fn new(repo: Arc<dyn RecipientRepository>, messenger: Arc<dyn MessengerClient>) -> Self {
        Self { repo, messenger }
    }

    /// Sends `text` to the explicit `psid`, or to every known recipient.
    ///
    /// Sends go out one at a time in registry order. A platform error for one
    /// recipient lands in its result and the batch continues.
    pub async fn execute(&self, request: NotifyRequest) -> Result<NotifyReport, NotifyError> {
        let text = request
            .text
            .filter(|text| !text.is_empty())
            .ok_or(NotifyError::MissingText)?;

        // An explicit target bypasses the registry entirely.
        let recipients = match request.psid.filter(|psid| !psid.is_empty()) {
            Some(psid) => vec![psid],
            None => self.repo.all().await?,
        };
        if recipients.is_empty() {
            return Err(NotifyError::NoRecipients);
        }

        let delivery = Delivery::from_tag(request.tag);
        let mut results = Vec::with_capacity(recipients.len());
        for psid in recipients {
            let message = OutboundMessage {
                recipient: psid.clone(),
                text: text.clone(),
                delivery: delivery.clone(),
            };
            let result = self.messenger.send(&message).await?;
            results.push(DeliveryResult { psid, result });
        }

        info!(
            sent = results.len(),
            messaging_type = delivery.messaging_type(),
            "notification fanned out"
        );
        Ok(NotifyReport { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::services::messenger::testing::RecordingMessenger,
        domain::repositories::testing::BrokenRecipientRepository,
        infrastructure::repositories::in_memory::InMemoryRecipientRepository,
    };

    async fn registry(psids: &[&str]) -> Arc<InMemoryRecipientRepository> {
        let repo = Arc::new(InMemoryRecipientRepository::new());
        for psid in psids {
            repo.add(psid).await.unwrap();
        }
        repo
    }

    fn request(text: Option<&str>, psid: Option<&str>, tag: Option<&str>) -> NotifyRequest {
        NotifyRequest {
            text: text.map(str::to_string),
            psid: psid.map(str::to_string),
            tag: tag.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn broadcasts_to_registry_in_order() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(registry(&["A", "B", "C"]).await, messenger.clone());

        let report = usecase
            .execute(request(Some("leak detected"), None, None))
            .await
            .unwrap();

        let sent = messenger.sent();
        let targets: Vec<_> = sent.iter().map(|m| m.recipient.as_str()).collect();
        assert_eq!(targets, vec!["A", "B", "C"]);
        assert!(sent.iter().all(|m| m.delivery == Delivery::Response));
        assert!(sent.iter().all(|m| m.text == "leak detected"));

        let psids: Vec<_> = report.results.iter().map(|r| r.psid.as_str()).collect();
        assert_eq!(psids, vec!["A", "B", "C"]);
        assert_eq!(report.results[1].result["recipient_id"], "B");
    }

    #[tokio::test]
    async fn explicit_psid_with_tag_bypasses_registry() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(registry(&["A", "B"]).await, messenger.clone());

        let report = usecase
            .execute(request(Some("alert"), Some("X"), Some("ACCOUNT_UPDATE")))
            .await
            .unwrap();

        assert_eq!(
            messenger.sent(),
            vec![OutboundMessage {
                recipient: "X".to_string(),
                text: "alert".to_string(),
                delivery: Delivery::Tagged("ACCOUNT_UPDATE".to_string()),
            }]
        );
        assert_eq!(report.results.len(), 1);
    }

    #[tokio::test]
    async fn explicit_psid_works_with_empty_registry() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(registry(&[]).await, messenger.clone());

        usecase.execute(request(Some("alert"), Some("X"), None)).await.unwrap();

        assert_eq!(messenger.sent().len(), 1);
        assert_eq!(messenger.sent()[0].recipient, "X");
    }

    #[tokio::test]
    async fn missing_text_sends_nothing() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(registry(&["A"]).await, messenger.clone());

        let missing = usecase.execute(request(None, None, None)).await;
        let empty = usecase.execute(request(Some(""), Some("X"), None)).await;

        assert!(matches!(missing, Err(NotifyError::MissingText)));
        assert!(matches!(empty, Err(NotifyError::MissingText)));
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_registry_has_no_recipients() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(registry(&[]).await, messenger.clone());

        let result = usecase.execute(request(Some("alert"), Some(""), None)).await;

        assert!(matches!(result, Err(NotifyError::NoRecipients)));
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_internal() {
        let messenger = Arc::new(RecordingMessenger::failing_for(&["B"]));
        let usecase = NotifyRecipientsUseCase::new(registry(&["A", "B", "C"]).await, messenger.clone());

        let result = usecase.execute(request(Some("alert"), None, None)).await;

        assert!(matches!(result, Err(NotifyError::Other(_))));
        assert_eq!(messenger.sent().len(), 2);
    }

    #[tokio::test]
    async fn registry_failure_is_internal() {
        let messenger = Arc::new(RecordingMessenger::new());
        let usecase = NotifyRecipientsUseCase::new(Arc::new(BrokenRecipientRepository), messenger.clone());

        let result = usecase.execute(request(Some("alert"), None, None)).await;

        assert!(matches!(result, Err(NotifyError::Other(_))));
    }
}
