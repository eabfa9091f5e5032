use serde::{Deserialize, Serialize};

/// How a send is allowed past the platform's 24h service window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// The recipient wrote to the page within the window.
    Response,
    /// Outside the window; requires an approved non-promotional tag.
    Tagged(String),
}

impl Delivery {
    /// An absent or blank tag means a plain response.
    pub fn from_tag(tag: Option<String>) -> Self {
        match tag {
            Some(tag) if !tag.trim().is_empty() => Delivery::Tagged(tag),
            _ => Delivery::Response,
        }
    }

    pub fn messaging_type(&self) -> &'static str {
        match self {
            Delivery::Response => "RESPONSE",
            Delivery::Tagged(_) => "MESSAGE_TAG",
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Delivery::Response => None,
            Delivery::Tagged(tag) => Some(tag.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub recipient: String,
    pub text: String,
    pub delivery: Delivery,
}

impl OutboundMessage {
    pub fn response(recipient: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            text: text.into(),
            delivery: Delivery::Response,
        }
    }
}
