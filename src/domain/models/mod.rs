pub mod message;
pub mod webhook;

pub use message::{Delivery, OutboundMessage};
pub use webhook::WebhookEnvelope;
