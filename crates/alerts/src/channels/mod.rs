//! Delivery channels for alert messages.

use async_trait::async_trait;

use crate::context::{AlertKind, ExecutionContext};
use crate::error::AlertError;

pub mod slack;

pub use slack::SlackChannel;

/// A destination that delivers exactly one alert per call.
///
/// Implementations resolve their own credentials at send time and must
/// surface every failure; retrying and rate-limit backoff belong to the
/// caller's policy, not the channel.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Channel name for log fields.
    fn name(&self) -> &'static str;

    /// Delivers a single alert for the given event kind and context.
    async fn send(&self, kind: AlertKind, context: &ExecutionContext) -> Result<(), AlertError>;
}
