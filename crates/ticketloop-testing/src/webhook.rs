//! HTTP mocking utilities for the webhook receiver.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer as WiremockServer, ResponseTemplate,
};

/// Path the simulated receiver listens on, matching the deployed one.
pub const WEBHOOK_PATH: &str = "/api/webhook/ticket-created";

/// Mock webhook receiver for testing ticket-created notifications.
pub struct WebhookReceiver {
    server: WiremockServer,
}

impl WebhookReceiver {
    /// Starts a new mock receiver on a random port.
    pub async fn start() -> Self {
        Self { server: WiremockServer::start().await }
    }

    /// Returns the full URL notifications should be posted to.
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), WEBHOOK_PATH)
    }

    /// Configures the receiver to acknowledge notifications with 200.
    pub async fn respond_ok(&self) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Configures the receiver to fail every notification with the given
    /// status.
    pub async fn respond_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Returns all requests received by the mock receiver.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Waits until the receiver has seen at least `expected` requests.
    ///
    /// Notifications run on a spawned task, so tests poll instead of
    /// asserting immediately after the API call returns.
    pub async fn wait_for_requests(&self, expected: usize, timeout: std::time::Duration) -> bool {
        let start = std::time::Instant::now();

        while start.elapsed() < timeout {
            if self.received_requests().await.len() >= expected {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(25)).await;
        }

        false
    }
}
