use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use subprobe_common::error::ReconError;
use subprobe_common::notify::{Delivery, NotificationGateway};

/// Posts deliveries as JSON over HTTPS.
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    pub fn new(timeout: Duration) -> Result<Self, ReconError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReconError::Notification(format!("building HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NotificationGateway for WebhookNotifier {
    async fn deliver(&self, delivery: &Delivery) -> Result<(), ReconError> {
        let response = self
            .client
            .post(&delivery.endpoint)
            .json(&delivery.body)
            .send()
            .await
            .map_err(|e| ReconError::Notification(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ReconError::Notification(format!("server answered {status}")))
        }
    }
}
