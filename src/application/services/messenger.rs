use async_trait::async_trait;
use serde_json::Value;

use crate::domain::models::OutboundMessage;

/// Outbound side of the platform's Send API.
///
/// `Ok` carries the platform's response body, including error bodies from
/// non-success statuses. `Err` is reserved for transport failures and bodies
/// that cannot be decoded.
#[async_trait]
pub trait MessengerClient: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<Value>;
}
