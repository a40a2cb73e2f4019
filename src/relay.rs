use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::form::TemplateParams;

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const GENERIC_FAILURE: &str = "Failed to send message. Please try again.";

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the email-relay service that delivers the contact form as
/// an email. The wire format is the relay's, not ours.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl RelayClient {
    pub fn new(service_id: String, template_id: String, public_key: String) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), service_id, template_id, public_key)
    }

    pub fn with_endpoint(
        endpoint: String,
        service_id: String,
        template_id: String,
        public_key: String,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            service_id,
            template_id,
            public_key,
        }
    }

    /// Relay the payload. Every error carries a user-facing message:
    /// a rejection body's structured `message` when parsable, the
    /// generic failure string for everything else. Transport details
    /// go to the log, never to the banner.
    pub async fn send(&self, params: &TemplateParams) -> Result<()> {
        let request = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: params,
        };

        debug!(endpoint = %self.endpoint, "relaying contact form");

        let response = match self.client.post(&self.endpoint).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "relay request failed");
                return Err(anyhow!(GENERIC_FAILURE));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "relay rejected contact form");
            return Err(anyhow!(failure_message(&body)));
        }

        debug!(%status, "contact form relayed");
        Ok(())
    }
}

/// Extract a human-readable message from a relay error body. The relay
/// may answer with JSON carrying a `message` field; anything else falls
/// back to the generic failure string.
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[tokio::test]
    async fn transport_failure_yields_the_generic_message() {
        let relay = RelayClient::with_endpoint(
            "http://127.0.0.1:1/send".to_string(),
            "svc".to_string(),
            "tpl".to_string(),
            "key".to_string(),
        );
        let params =
            TemplateParams::build("Jordan", "j@example.com", "Hello there!", Local::now());

        let err = relay.send(&params).await.unwrap_err();
        // Connection details stay out of the user-facing text.
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn structured_error_surfaces_its_message() {
        assert_eq!(
            failure_message(r#"{"message":"quota exceeded"}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn unparsable_body_falls_back_to_generic() {
        assert_eq!(failure_message("internal server error"), GENERIC_FAILURE);
        assert_eq!(failure_message(""), GENERIC_FAILURE);
    }

    #[test]
    fn structured_body_without_message_falls_back() {
        assert_eq!(failure_message(r#"{"status":418}"#), GENERIC_FAILURE);
    }
}
