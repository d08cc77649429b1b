//! Task declarations and the per-dag defaults they inherit.

use serde::{Deserialize, Serialize};

use crate::params::Params;

/// Default settings every task in a dag starts from.
///
/// These are the knobs the scheduler consumes per task instance. They are
/// declaration data only: retry, SLA, and email enforcement happen in the
/// engine, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefaults {
    pub owner: String,
    /// Skip a run until the previous run of the same task succeeded.
    pub depends_on_past: bool,
    /// Addresses the engine notifies by mail, when mail is enabled below.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    pub email_on_failure: bool,
    pub email_on_retry: bool,
    /// Times the engine may re-run a failed task instance.
    pub retries: u32,
    /// Pause between retry attempts.
    pub retry_delay_secs: u64,
    /// Missed-deadline threshold measured from the scheduled start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_secs: Option<u64>,
    /// Second-class parameter layer, overridden by task params.
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            owner: "flowhook".to_string(),
            depends_on_past: false,
            email: Vec::new(),
            email_on_failure: false,
            email_on_retry: false,
            retries: 0,
            retry_delay_secs: 300,
            sla_secs: None,
            params: Params::new(),
        }
    }
}

impl TaskDefaults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    #[must_use]
    pub fn with_depends_on_past(mut self, depends_on_past: bool) -> Self {
        self.depends_on_past = depends_on_past;
        self
    }

    /// Adds one notification address.
    #[must_use]
    pub fn with_email(mut self, address: impl Into<String>) -> Self {
        self.email.push(address.into());
        self
    }

    #[must_use]
    pub fn with_email_on_failure(mut self, email_on_failure: bool) -> Self {
        self.email_on_failure = email_on_failure;
        self
    }

    #[must_use]
    pub fn with_email_on_retry(mut self, email_on_retry: bool) -> Self {
        self.email_on_retry = email_on_retry;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_retry_delay_secs(mut self, retry_delay_secs: u64) -> Self {
        self.retry_delay_secs = retry_delay_secs;
        self
    }

    #[must_use]
    pub fn with_sla_secs(mut self, sla_secs: u64) -> Self {
        self.sla_secs = Some(sla_secs);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

/// A single shell command in a dag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BashTask {
    pub id: String,
    /// Shell command, optionally a handlebars template (see [`crate::template`]).
    pub command: String,
    /// Ids of tasks that must succeed before this one runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Overrides [`TaskDefaults::depends_on_past`] when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_past: Option<bool>,
    /// First-class parameter layer, the highest precedence.
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    /// Markdown documentation surfaced by UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl BashTask {
    #[must_use]
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            depends_on: Vec::new(),
            depends_on_past: None,
            params: Params::new(),
            doc: None,
        }
    }

    /// Requires `upstream` to succeed before this task runs.
    #[must_use]
    pub fn after(mut self, upstream: impl Into<String>) -> Self {
        self.depends_on.push(upstream.into());
        self
    }

    #[must_use]
    pub fn with_depends_on_past(mut self, depends_on_past: bool) -> Self {
        self.depends_on_past = Some(depends_on_past);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
