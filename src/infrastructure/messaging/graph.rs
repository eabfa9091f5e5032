use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    application::services::messenger::MessengerClient, domain::models::OutboundMessage,
};

/// Messenger Send API client (`POST /{version}/me/messages`).
pub struct GraphMessengerClient {
    http: Client,
    base_url: String,
    api_version: String,
    access_token: Option<String>,
}

impl GraphMessengerClient {
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        access_token: Option<String>,
    ) -> anyhow::Result<Arc<dyn MessengerClient>> {
        Ok(Arc::new(Self {
            http: Client::builder()
                .user_agent("messenger-relay/graph")
                .build()?,
            base_url: base_url.into(),
            api_version: api_version.into(),
            access_token,
        }) as Arc<dyn MessengerClient>)
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/me/messages", self.base_url, self.api_version)
    }
}

#[async_trait]
impl MessengerClient for GraphMessengerClient {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<Value> {
        let payload = SendRequest {
            recipient: SendRecipient {
                id: &message.recipient,
            },
            message: SendMessage {
                text: &message.text,
            },
            messaging_type: message.delivery.messaging_type(),
            tag: message.delivery.tag(),
        };

        debug!(
            recipient = %message.recipient,
            messaging_type = payload.messaging_type,
            "calling send api"
        );

        let response = self
            .http
            .post(self.messages_url())
            .query(&[("access_token", self.access_token.as_deref().unwrap_or(""))])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            error!(
                status = status.as_u16(),
                recipient = %message.recipient,
                body = %body,
                "send api error"
            );
        }

        Ok(body)
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    recipient: SendRecipient<'a>,
    message: SendMessage<'a>,
    messaging_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SendRecipient<'a> {
    id: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;
    use crate::domain::models::Delivery;

    fn client(server: &MockServer) -> Arc<dyn MessengerClient> {
        GraphMessengerClient::new(server.base_url(), "v21.0", Some("page-token".to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn sends_response_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v21.0/me/messages")
                    .query_param("access_token", "page-token")
                    .json_body(json!({
                        "recipient": { "id": "A" },
                        "message": { "text": "leak detected" },
                        "messaging_type": "RESPONSE"
                    }));
                then.status(200)
                    .json_body(json!({ "recipient_id": "A", "message_id": "mid.1" }));
            })
            .await;

        let result = client(&server)
            .send(&OutboundMessage::response("A", "leak detected"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result["message_id"], "mid.1");
    }

    #[tokio::test]
    async fn sends_tagged_message() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v21.0/me/messages").json_body(json!({
                    "recipient": { "id": "X" },
                    "message": { "text": "alert" },
                    "messaging_type": "MESSAGE_TAG",
                    "tag": "ACCOUNT_UPDATE"
                }));
                then.status(200)
                    .json_body(json!({ "recipient_id": "X", "message_id": "mid.2" }));
            })
            .await;

        let message = OutboundMessage {
            recipient: "X".to_string(),
            text: "alert".to_string(),
            delivery: Delivery::Tagged("ACCOUNT_UPDATE".to_string()),
        };
        client(&server).send(&message).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn returns_error_body_without_failing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v21.0/me/messages");
                then.status(400).json_body(json!({
                    "error": { "message": "(#10) outside allowed window", "code": 10 }
                }));
            })
            .await;

        let result = client(&server)
            .send(&OutboundMessage::response("A", "late"))
            .await
            .unwrap();

        assert_eq!(result["error"]["code"], 10);
    }

    #[tokio::test]
    async fn undecodable_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v21.0/me/messages");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;

        let result = client(&server)
            .send(&OutboundMessage::response("A", "hello"))
            .await;

        assert!(result.is_err());
    }
}
