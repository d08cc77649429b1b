//! The `slack_usage` dag: three shell tasks with Slack alert callbacks.
//!
//! `print_date` runs first; `sleep` and `templated` fan out behind it.
//! Failures and SLA misses post to the webhook resolved from the `slack`
//! connection id.

use std::sync::Arc;

use alerts::{Alerter, ConnectionProvider, SlackChannel};
use pipeline::{BashTask, Dag, Params, Schedule, StartDate, TaskDefaults};

/// Connection id the alert callbacks resolve at send time.
pub const SLACK_CONN_ID: &str = "slack";

/// Dag id, also the registry key.
pub const DAG_ID: &str = "slack_usage";

/// Five echo rounds of the execution date, the date a week out, and the
/// task's `my_param`.
const TEMPLATED_COMMAND: &str = r#"{{#each (range 5)}}
echo "{{../ds}}"
echo "{{ds_add ../ds 7}}"
echo "{{../params.my_param}}"
{{/each}}"#;

/// Builds the dag declaration.
#[must_use]
pub fn dag() -> Dag {
    let defaults = TaskDefaults::new()
        .with_owner("flowhook")
        .with_depends_on_past(false)
        .with_email("ops@example.com")
        .with_email_on_failure(false)
        .with_email_on_retry(false)
        .with_retries(1)
        .with_retry_delay_secs(300)
        .with_sla_secs(1)
        .with_params(Params::new().with("my_param", "This is 2nd class default param"));

    Dag::new(DAG_ID, Schedule::daily(), StartDate::days_ago(2))
        .with_description("A simple DAG with Slack alerts")
        .with_defaults(defaults)
        .with_params(Params::new().with("my_param", "This is 3rd class default param"))
        .with_task(
            BashTask::new("print_date", "date")
                .with_doc("Prints the current date; the other tasks wait on it."),
        )
        .with_task(
            BashTask::new("sleep", "sleep 5")
                .after("print_date")
                .with_depends_on_past(false)
                .with_doc("Sleeps five seconds so the run log has a duration to show."),
        )
        .with_task(
            BashTask::new("templated", TEMPLATED_COMMAND)
                .after("print_date")
                .with_params(Params::new().with("my_param", "This is 1st class default param"))
                .with_doc("Demonstrates command templating: dates, date math, layered params."),
        )
}

/// Alert callbacks for this dag, bound to the `slack` connection.
#[must_use]
pub fn alerter(connections: Arc<dyn ConnectionProvider>) -> Alerter {
    Alerter::new(Arc::new(SlackChannel::new(SLACK_CONN_ID, connections)))
}
