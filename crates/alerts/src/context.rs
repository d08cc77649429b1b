//! Execution details handed to callbacks, and the event kinds that
//! trigger them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used in alert messages.
const EXECUTION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Execution details the engine hands to a callback.
///
/// One context describes one task instance: which task, in which dag, for
/// which logical execution timestamp, and where its log lives. The engine
/// owns construction; callbacks only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub task_id: String,
    pub dag_id: String,
    pub execution_date: DateTime<Utc>,
    pub log_url: String,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(
        task_id: impl Into<String>,
        dag_id: impl Into<String>,
        execution_date: DateTime<Utc>,
        log_url: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            dag_id: dag_id.into(),
            execution_date,
            log_url: log_url.into(),
        }
    }

    /// Execution timestamp as it appears in alert messages.
    #[must_use]
    pub fn execution_time(&self) -> String {
        self.execution_date.format(EXECUTION_TIME_FORMAT).to_string()
    }
}

/// The two engine events that trigger an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// A task instance exhausted its retries and failed.
    TaskFailure,
    /// A task instance blew past its declared SLA.
    SlaMiss,
}

impl AlertKind {
    /// Emoji marker that opens the alert message.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::TaskFailure => ":red_circle:",
            Self::SlaMiss => ":yellow_circle:",
        }
    }

    /// Headline following the marker.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::TaskFailure => "Task Failed.",
            Self::SlaMiss => "SLA Missed.",
        }
    }

    /// Snake-case name for log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TaskFailure => "task_failure",
            Self::SlaMiss => "sla_miss",
        }
    }
}
