//! Slack webhook alert channel.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::channels::AlertChannel;
use crate::connections::ConnectionProvider;
use crate::context::{AlertKind, ExecutionContext};
use crate::error::AlertError;
use crate::message;

/// Display name alerts are posted under.
const DEFAULT_USERNAME: &str = "flowhook";

/// Slack webhook alert channel.
///
/// Credentials are resolved through the injected [`ConnectionProvider`] on
/// every send; the channel itself holds no secrets.
pub struct SlackChannel {
    conn_id: String,
    username: String,
    connections: Arc<dyn ConnectionProvider>,
    client: reqwest::Client,
}

impl SlackChannel {
    /// Create a channel that resolves `conn_id` through `connections`.
    #[must_use]
    pub fn new(conn_id: impl Into<String>, connections: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            conn_id: conn_id.into(),
            username: DEFAULT_USERNAME.to_string(),
            connections,
            client: reqwest::Client::new(),
        }
    }

    /// Override the display name alerts are posted under.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }
}

#[async_trait]
impl AlertChannel for SlackChannel {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, kind: AlertKind, context: &ExecutionContext) -> Result<(), AlertError> {
        let connection = self.connections.lookup(&self.conn_id)?;

        let payload = SlackPayload {
            text: message::compose(kind, context),
            username: &self.username,
        };

        debug!(
            channel = "slack",
            kind = kind.as_str(),
            task = %context.task_id,
            dag = %context.dag_id,
            "Sending alert"
        );

        let response = self
            .client
            .post(connection.webhook_url())
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            debug!(channel = "slack", kind = kind.as_str(), "Alert sent");
            Ok(())
        } else if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);

            warn!(
                channel = "slack",
                retry_after_secs = retry_after,
                "Rate limited by Slack"
            );

            Err(AlertError::RateLimited {
                retry_after_secs: retry_after,
            })
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                channel = "slack",
                status = %status,
                body = %body,
                "Slack webhook request failed"
            );

            Err(AlertError::Rejected { status, body })
        }
    }
}

/// Wire payload for the incoming-webhook API.
#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    text: String,
    username: &'a str,
}
