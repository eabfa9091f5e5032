use serde_json::Value;

/// Discriminator sent by page subscriptions.
pub const PAGE_OBJECT: &str = "page";

/// Typed view of a webhook body. Built leniently: a field that is missing or
/// has the wrong shape is read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookEnvelope {
    pub object: Option<String>,
    pub entries: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookEntry {
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagingEvent {
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

impl WebhookEnvelope {
    pub fn from_value(value: &Value) -> Self {
        Self {
            object: string_field(value, "object"),
            entries: array_field(value, "entry")
                .map(WebhookEntry::from_value)
                .collect(),
        }
    }

    pub fn is_page(&self) -> bool {
        self.object.as_deref() == Some(PAGE_OBJECT)
    }

    pub fn events(&self) -> impl Iterator<Item = &MessagingEvent> {
        self.entries.iter().flat_map(|entry| entry.messaging.iter())
    }
}

impl WebhookEntry {
    fn from_value(value: &Value) -> Self {
        Self {
            messaging: array_field(value, "messaging")
                .map(MessagingEvent::from_value)
                .collect(),
        }
    }
}

impl MessagingEvent {
    fn from_value(value: &Value) -> Self {
        Self {
            sender: value.get("sender").and_then(id_of),
            recipient: value.get("recipient").and_then(id_of),
        }
    }

    /// Sender PSID, if present and non-empty.
    pub fn sender_id(&self) -> Option<&str> {
        self.sender.as_deref().filter(|id| !id.is_empty())
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn array_field<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

// PSIDs arrive as strings, but tolerate numeric ids too.
fn id_of(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
