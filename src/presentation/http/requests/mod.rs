use poem::Body;
use serde_json::Value;
use tracing::debug;

/// Reads a request body as JSON without trusting `Content-Type`. Sensor boards
/// often omit the header; an empty or unparsable body reads as `null`.
pub async fn read_json_body(body: Body) -> Value {
    let bytes = match body.into_vec().await {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(error = %err, "failed to read request body");
            return Value::Null;
        }
    };
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        debug!(error = %err, "request body is not json");
        Value::Null
    })
}

/// Alert trigger sent by the sensor device. Built leniently so that a missing
/// `text` is answered with the relay's own error body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NotifyRequestDto {
    pub text: Option<String>,
    /// Single target; when absent the alert goes to every known recipient.
    pub psid: Option<String>,
    /// Message tag for sends outside the 24h window, e.g. `ACCOUNT_UPDATE`.
    pub tag: Option<String>,
}

impl NotifyRequestDto {
    pub fn from_value(value: &Value) -> Self {
        Self {
            text: scalar_field(value, "text"),
            psid: scalar_field(value, "psid"),
            tag: scalar_field(value, "tag"),
        }
    }
}

// Readings like `{"text": 812}` are sent as their decimal form.
fn scalar_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn unreadable_bodies_become_null() {
        assert_eq!(read_json_body(Body::empty()).await, Value::Null);
        assert_eq!(read_json_body(Body::from_string("text=hi".to_string())).await, Value::Null);
        assert_eq!(
            read_json_body(Body::from_string(r#"{"text":"hi"}"#.to_string())).await,
            json!({ "text": "hi" })
        );
    }

    #[test]
    fn notify_request_reads_scalars_only() {
        let request = NotifyRequestDto::from_value(&json!({
            "text": 812,
            "psid": "X",
            "tag": { "nested": true }
        }));

        assert_eq!(
            request,
            NotifyRequestDto {
                text: Some("812".to_string()),
                psid: Some("X".to_string()),
                tag: None,
            }
        );
        assert_eq!(NotifyRequestDto::from_value(&Value::Null), NotifyRequestDto::default());
    }
}
