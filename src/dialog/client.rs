use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::error::DialogError;
use super::interface::DialogApi;
use super::types::{DialogRequest, DialogResponse};
use crate::config::DialogConfig;

/// Client for a dialog webhook that answers JSON queries with typed replies
#[derive(Debug, Clone)]
pub struct WebhookDialogClient {
    client: Client,
    webhook_url: String,
    api_key: String,
    unit_key: String,
}

impl WebhookDialogClient {
    pub fn new(config: &DialogConfig, timeout: Duration) -> Result<Self, DialogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            webhook_url: config.webhook_url.clone(),
            api_key: config.api_key.clone(),
            unit_key: config.unit_key.clone(),
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl DialogApi for WebhookDialogClient {
    fn create_request(&self, query: &str) -> DialogRequest {
        DialogRequest::new(query, self.api_key.as_str(), self.unit_key.as_str())
    }

    async fn send(&self, request: DialogRequest) -> Result<DialogResponse, DialogError> {
        debug!("Sending dialog request to {}: query={}", self.webhook_url, request.query);

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Dialog webhook returned {}", status);
            return Err(DialogError::Status(status));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            error!("Dialog webhook returned an empty body");
            return Err(DialogError::EmptyBody);
        }

        let reply: DialogResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to decode dialog response: {}", e);
            DialogError::Decode(e)
        })?;

        debug!("Dialog response received: {} replies", reply.replies.len());
        Ok(reply)
    }
}
