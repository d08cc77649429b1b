//! Connection lookup: resolving a connection id to webhook credentials.
//!
//! Channels never read credentials themselves; they hold a
//! [`ConnectionProvider`] and resolve the id fresh on every send, so
//! rotation in the backing store takes effect without restarts.

use std::collections::BTreeMap;

use crate::error::AlertError;

/// Default base URL for incoming Slack webhooks.
pub const DEFAULT_WEBHOOK_BASE_URL: &str = "https://hooks.slack.com/services";

/// Resolved webhook credentials for one connection id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Endpoint base, without the secret path segment.
    pub base_url: String,
    /// Secret path segment appended to the base.
    pub token: String,
}

impl Connection {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Full endpoint the alert is posted to.
    #[must_use]
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token.trim_start_matches('/')
        )
    }
}

/// Source of connection credentials, injected into channels.
pub trait ConnectionProvider: Send + Sync {
    /// Resolves a connection id to credentials.
    ///
    /// Called once per alert delivery; implementations must not cache
    /// staleness in. An unknown id is an error, not a silent skip.
    fn lookup(&self, id: &str) -> Result<Connection, AlertError>;
}

/// Environment-backed provider.
///
/// For a connection id `slack` it reads `SLACK_WEBHOOK_TOKEN` (required)
/// and `SLACK_WEBHOOK_BASE_URL` (optional, defaults to the Slack services
/// endpoint). Dashes in ids map to underscores.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConnections;

impl EnvConnections {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn env_prefix(id: &str) -> String {
        id.to_uppercase().replace('-', "_")
    }
}

impl ConnectionProvider for EnvConnections {
    fn lookup(&self, id: &str) -> Result<Connection, AlertError> {
        let prefix = Self::env_prefix(id);
        let token_var = format!("{prefix}_WEBHOOK_TOKEN");
        let base_var = format!("{prefix}_WEBHOOK_BASE_URL");

        let token = std::env::var(&token_var).map_err(|_| AlertError::UnknownConnection {
            id: id.to_string(),
            reason: format!("{token_var} is not set"),
        })?;
        let base_url =
            std::env::var(&base_var).unwrap_or_else(|_| DEFAULT_WEBHOOK_BASE_URL.to_string());

        Ok(Connection::new(base_url, token))
    }
}

/// In-memory provider for tests and embedders that load config themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticConnections {
    connections: BTreeMap<String, Connection>,
}

impl StaticConnections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, connection: Connection) -> Self {
        self.connections.insert(id.into(), connection);
        self
    }
}

impl ConnectionProvider for StaticConnections {
    fn lookup(&self, id: &str) -> Result<Connection, AlertError> {
        self.connections
            .get(id)
            .cloned()
            .ok_or_else(|| AlertError::UnknownConnection {
                id: id.to_string(),
                reason: "no such entry".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env mutation is process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_webhook_url_joins_cleanly() {
        let connection = Connection::new("https://hooks.example.com/", "/T000/B000/secret");
        assert_eq!(
            connection.webhook_url(),
            "https://hooks.example.com/T000/B000/secret"
        );
    }

    #[test]
    fn test_env_lookup_with_default_base() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("SLACK_WEBHOOK_BASE_URL");
        std::env::set_var("SLACK_WEBHOOK_TOKEN", "T000/B000/secret");

        let connection = EnvConnections::new().lookup("slack").unwrap();
        assert_eq!(connection.base_url, DEFAULT_WEBHOOK_BASE_URL);
        assert_eq!(connection.token, "T000/B000/secret");

        std::env::remove_var("SLACK_WEBHOOK_TOKEN");
    }

    #[test]
    fn test_env_lookup_missing_token() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("OPSCHAT_WEBHOOK_TOKEN");

        let result = EnvConnections::new().lookup("opschat");
        assert!(matches!(
            result,
            Err(AlertError::UnknownConnection { id, .. }) if id == "opschat"
        ));
    }

    #[test]
    fn test_env_prefix_maps_dashes() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("ON_CALL_WEBHOOK_TOKEN", "tok");
        std::env::set_var("ON_CALL_WEBHOOK_BASE_URL", "https://hooks.example.com");

        let connection = EnvConnections::new().lookup("on-call").unwrap();
        assert_eq!(connection.webhook_url(), "https://hooks.example.com/tok");

        std::env::remove_var("ON_CALL_WEBHOOK_TOKEN");
        std::env::remove_var("ON_CALL_WEBHOOK_BASE_URL");
    }

    #[test]
    fn test_static_lookup() {
        let provider =
            StaticConnections::new().with("slack", Connection::new("http://127.0.0.1:9", "tok"));

        assert!(provider.lookup("slack").is_ok());
        assert!(matches!(
            provider.lookup("other"),
            Err(AlertError::UnknownConnection { id, .. }) if id == "other"
        ));
    }
}
