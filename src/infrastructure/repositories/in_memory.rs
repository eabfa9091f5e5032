use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::RecipientRepository;

#[derive(Default)]
struct RecipientSet {
    order: Vec<String>,
    known: HashSet<String>,
}

/// Process-lifetime PSID store. Everything is lost on restart.
#[derive(Default)]
pub struct InMemoryRecipientRepository {
    recipients: Arc<RwLock<RecipientSet>>,
}

impl InMemoryRecipientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipientRepository for InMemoryRecipientRepository {
    async fn add(&self, psid: &str) -> anyhow::Result<bool> {
        let mut recipients = self.recipients.write().await;
        if recipients.known.contains(psid) {
            return Ok(false);
        }
        recipients.known.insert(psid.to_string());
        recipients.order.push(psid.to_string());
        Ok(true)
    }

    async fn all(&self) -> anyhow::Result<Vec<String>> {
        let recipients = self.recipients.read().await;
        Ok(recipients.order.clone())
    }

    async fn count(&self) -> anyhow::Result<usize> {
        let recipients = self.recipients.read().await;
        Ok(recipients.order.len())
    }
}
