//! HTTP client announcing ticket creation to a configured webhook.
//!
//! Sends the created ticket (with its contact) as JSON to one external
//! endpoint with a bounded timeout. At-most-once, best-effort: no retry,
//! no queue, no delivery guarantee.

use std::time::Duration;

use ticketloop_core::{TicketNotifier, TicketWithContact};
use tracing::{debug, warn};

use crate::error::{NotifyError, Result};

/// Configuration for the webhook notifier.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Destination URL for ticket-created notifications.
    pub webhook_url: String,
    /// Timeout for the outbound request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl NotifierConfig {
    /// Creates a configuration for the given URL with the default 10s
    /// timeout.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout: Duration::from_secs(10),
            user_agent: "Ticketloop-Notifier/1.0".to_string(),
        }
    }
}

/// Webhook notifier backed by a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl Notifier {
    /// Creates a new notifier with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: NotifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NotifyError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Destination URL this notifier posts to.
    pub fn webhook_url(&self) -> &str {
        &self.config.webhook_url
    }

    /// Posts the ticket snapshot to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns a categorized error for timeouts, connection failures, and
    /// non-2xx responses. Callers inside this crate log and discard it;
    /// nothing propagates past the notifier boundary.
    pub async fn send(&self, ticket: &TicketWithContact) -> Result<()> {
        debug!(ticket_id = %ticket.id, url = %self.config.webhook_url, "Sending notification");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(ticket)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout { timeout_seconds: self.config.timeout.as_secs() }
                } else if e.is_connect() {
                    NotifyError::Connection { message: format!("connection failed: {e}") }
                } else {
                    NotifyError::Connection { message: e.to_string() }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus { status: status.as_u16() });
        }

        debug!(ticket_id = %ticket.id, status = status.as_u16(), "Notification delivered");
        Ok(())
    }
}

#[async_trait::async_trait]
impl TicketNotifier for Notifier {
    async fn ticket_created(&self, ticket: &TicketWithContact) {
        if let Err(e) = self.send(ticket).await {
            warn!(
                ticket_id = %ticket.id,
                url = %self.config.webhook_url,
                error = %e,
                "Ticket notification failed"
            );
        }
    }
}
