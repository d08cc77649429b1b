//! Alert message composition.

use crate::context::{AlertKind, ExecutionContext};

/// Builds the mrkdwn alert text for one callback invocation.
///
/// Every message carries the same four context lines; only the marker and
/// headline vary by kind.
#[must_use]
pub fn compose(kind: AlertKind, context: &ExecutionContext) -> String {
    format!(
        "{marker} {headline}\n\
         *Task*: {task}\n\
         *Dag*: {dag}\n\
         *Execution Time*: {when}\n\
         *Log Url*: {log_url}",
        marker = kind.marker(),
        headline = kind.headline(),
        task = context.task_id,
        dag = context.dag_id,
        when = context.execution_time(),
        log_url = context.log_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn context() -> ExecutionContext {
        ExecutionContext::new(
            "print_date",
            "slack_usage",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            "http://x/log",
        )
    }

    #[test]
    fn test_failure_message_carries_context() {
        let message = compose(AlertKind::TaskFailure, &context());

        assert!(message.starts_with(":red_circle: Task Failed."));
        assert!(message.contains("*Task*: print_date"));
        assert!(message.contains("*Dag*: slack_usage"));
        assert!(message.contains("*Execution Time*: 2024-01-01T00:00:00"));
        assert!(message.contains("*Log Url*: http://x/log"));
    }

    #[test]
    fn test_sla_message_uses_distinct_marker() {
        let message = compose(AlertKind::SlaMiss, &context());

        assert!(message.starts_with(":yellow_circle: SLA Missed."));
        assert!(message.contains("*Task*: print_date"));
        assert!(message.contains("*Dag*: slack_usage"));
        assert!(message.contains("*Execution Time*: 2024-01-01T00:00:00"));
        assert!(message.contains("*Log Url*: http://x/log"));
    }

    #[test]
    fn test_messages_differ_only_in_header() {
        let failure = compose(AlertKind::TaskFailure, &context());
        let sla = compose(AlertKind::SlaMiss, &context());

        let failure_body = failure.split_once('\n').map(|(_, body)| body);
        let sla_body = sla.split_once('\n').map(|(_, body)| body);
        assert_eq!(failure_body, sla_body);
        assert_ne!(failure, sla);
    }
}
