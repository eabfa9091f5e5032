use tracing::warn;

const SUBSCRIBE_MODE: &str = "subscribe";

pub struct VerifyWebhookUseCase {
    verify_token: Option<String>,
}

pub struct VerifyWebhookRequest {
    pub mode: Option<String>,
    pub verify_token: Option<String>,
    pub challenge: Option<String>,
}

impl VerifyWebhookUseCase {
    pub fn new(verify_token: Option<String>) -> Self {
        Self { verify_token }
    }

    /// Returns the challenge to echo when the handshake is accepted.
    pub fn execute(&self, request: VerifyWebhookRequest) -> Option<String> {
        let Some(expected) = self.verify_token.as_deref() else {
            warn!("webhook verification attempted but VERIFY_TOKEN is not configured");
            return None;
        };

        let mode_ok = request.mode.as_deref() == Some(SUBSCRIBE_MODE);
        let token_ok = request.verify_token.as_deref() == Some(expected);

        match request.challenge {
            Some(challenge) if mode_ok && token_ok => Some(challenge),
            _ => {
                warn!(
                    mode = request.mode.as_deref().unwrap_or(""),
                    token_matched = token_ok,
                    "webhook verification rejected"
                );
                None
            }
        }
    }
}
