use async_trait::async_trait;

/// Known message senders, keyed by PSID. Membership only grows.
#[async_trait]
pub trait RecipientRepository: Send + Sync {
    /// Returns `true` when the PSID was not known before.
    async fn add(&self, psid: &str) -> anyhow::Result<bool>;
    /// Snapshot of every known PSID in insertion order.
    async fn all(&self) -> anyhow::Result<Vec<String>>;
    async fn count(&self) -> anyhow::Result<usize>;
}
