//! Webhook alert callbacks for flowhook task events.
//!
//! When the scheduler sees a task fail or miss its SLA it invokes one of
//! the [`Alerter`] callbacks with the task's [`ExecutionContext`]. The
//! alerter composes a message and delivers it through its channel, exactly
//! one message per invocation. Errors are never swallowed: a failed
//! credential lookup or webhook post propagates to the engine.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alerts::{Alerter, EnvConnections, ExecutionContext, SlackChannel};
//!
//! # async fn example() -> Result<(), alerts::AlertError> {
//! let alerter = Alerter::new(Arc::new(SlackChannel::new(
//!     "slack",
//!     Arc::new(EnvConnections::new()),
//! )));
//!
//! let context = ExecutionContext::new(
//!     "print_date",
//!     "slack_usage",
//!     chrono::Utc::now(),
//!     "http://scheduler.internal/log/print_date",
//! );
//! alerter.on_task_failure(&context).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`EnvConnections`] resolves the `slack` connection id from
//! `SLACK_WEBHOOK_TOKEN` and `SLACK_WEBHOOK_BASE_URL`. Any
//! [`ConnectionProvider`] can stand in; channels resolve credentials fresh
//! on every send.
//!
//! # Architecture
//!
//! - [`AlertChannel`] defines the delivery seam
//! - [`SlackChannel`] posts to incoming Slack webhooks
//! - [`Alerter`] exposes the two engine-facing callbacks

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod connections;
pub mod context;
pub mod error;
pub mod message;

pub use channels::{AlertChannel, SlackChannel};
pub use connections::{Connection, ConnectionProvider, EnvConnections, StaticConnections};
pub use context::{AlertKind, ExecutionContext};
pub use error::AlertError;
pub use message::compose;

use std::sync::Arc;

use tracing::{debug, error, info};

/// Engine-facing alert callbacks.
///
/// One alerter wraps one delivery channel. Each callback sends exactly one
/// message and waits for the result, so the engine can record delivery
/// failures against the originating task instance.
pub struct Alerter {
    channel: Arc<dyn AlertChannel>,
}

impl Alerter {
    #[must_use]
    pub fn new(channel: Arc<dyn AlertChannel>) -> Self {
        Self { channel }
    }

    /// Invoked by the engine when a task instance fails.
    pub async fn on_task_failure(&self, context: &ExecutionContext) -> Result<(), AlertError> {
        self.dispatch(AlertKind::TaskFailure, context).await
    }

    /// Invoked by the engine when a task instance misses its SLA.
    pub async fn on_sla_miss(&self, context: &ExecutionContext) -> Result<(), AlertError> {
        self.dispatch(AlertKind::SlaMiss, context).await
    }

    async fn dispatch(
        &self,
        kind: AlertKind,
        context: &ExecutionContext,
    ) -> Result<(), AlertError> {
        let channel_name = self.channel.name();

        debug!(
            channel = channel_name,
            kind = kind.as_str(),
            task = %context.task_id,
            dag = %context.dag_id,
            "Dispatching alert"
        );

        match self.channel.send(kind, context).await {
            Ok(()) => {
                info!(
                    channel = channel_name,
                    kind = kind.as_str(),
                    "Alert delivered"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    channel = channel_name,
                    kind = kind.as_str(),
                    error = %e,
                    "Alert delivery failed"
                );
                Err(e)
            }
        }
    }
}
