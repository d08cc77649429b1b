//! Shape, rendering, and alert-wiring tests for the shipped declarations.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alerts::{Connection, ExecutionContext, StaticConnections};
use dags::slack_usage;
use pipeline::StartDate;

#[test]
fn test_slack_usage_shape() {
    let dag = slack_usage::dag();
    dag.validate().unwrap();

    assert_eq!(dag.id, "slack_usage");
    assert_eq!(
        dag.description.as_deref(),
        Some("A simple DAG with Slack alerts")
    );
    assert_eq!(dag.schedule.interval_secs, 86_400);
    assert_eq!(dag.start_date, StartDate::days_ago(2));
    assert_eq!(dag.defaults.retries, 1);
    assert_eq!(dag.defaults.retry_delay_secs, 300);
    assert_eq!(dag.defaults.sla_secs, Some(1));
    assert!(!dag.defaults.depends_on_past);
    assert!(!dag.defaults.email_on_failure);
    assert!(!dag.defaults.email_on_retry);
    assert_eq!(dag.defaults.email, vec!["ops@example.com".to_string()]);

    let ids: Vec<&str> = dag.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(ids, vec!["print_date", "sleep", "templated"]);

    assert!(dag.task("print_date").unwrap().depends_on.is_empty());
    assert_eq!(dag.task("sleep").unwrap().depends_on, vec!["print_date"]);
    assert_eq!(
        dag.task("templated").unwrap().depends_on,
        vec!["print_date"]
    );
}

#[test]
fn test_every_task_is_documented() {
    let dag = slack_usage::dag();
    for task in &dag.tasks {
        assert!(task.doc.is_some(), "task `{}` has no doc", task.id);
    }
}

#[test]
fn test_param_layers_resolve_by_class() {
    let dag = slack_usage::dag();

    // Task-level params win on the templated task.
    let templated = dag.params_for("templated").unwrap();
    assert_eq!(
        templated.get("my_param").and_then(|value| value.as_str()),
        Some("This is 1st class default param")
    );

    // Tasks without their own params fall back to the dag defaults, not
    // the dag-level layer.
    let print_date = dag.params_for("print_date").unwrap();
    assert_eq!(
        print_date.get("my_param").and_then(|value| value.as_str()),
        Some("This is 2nd class default param")
    );
}

#[test]
fn test_templated_command_renders_five_rounds() {
    let dag = slack_usage::dag();
    let ds = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let rendered = dag.render_command("templated", ds).unwrap();

    assert_eq!(rendered.matches(r#"echo "2024-01-01""#).count(), 5);
    assert_eq!(rendered.matches(r#"echo "2024-01-08""#).count(), 5);
    assert_eq!(
        rendered
            .matches(r#"echo "This is 1st class default param""#)
            .count(),
        5
    );
}

#[test]
fn test_export_includes_slack_usage() {
    let registry = dags::registry().unwrap();
    let json = registry.export_json().unwrap();
    assert!(json.contains("\"slack_usage\""));
    assert!(json.contains("\"print_date\""));
}

#[tokio::test]
async fn test_alert_callbacks_post_to_slack_connection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let provider = StaticConnections::new().with(
        slack_usage::SLACK_CONN_ID,
        Connection::new(server.uri(), "hook"),
    );
    let alerter = slack_usage::alerter(Arc::new(provider));

    let context = ExecutionContext::new(
        "print_date",
        slack_usage::DAG_ID,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        "http://x/log",
    );

    alerter.on_task_failure(&context).await.unwrap();
    alerter.on_sla_miss(&context).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let failure: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(failure["username"], "flowhook");
    assert!(failure["text"]
        .as_str()
        .unwrap()
        .starts_with(":red_circle: Task Failed."));
    assert!(failure["text"].as_str().unwrap().contains("*Dag*: slack_usage"));

    let sla: serde_json::Value = requests[1].body_json().unwrap();
    assert!(sla["text"]
        .as_str()
        .unwrap()
        .starts_with(":yellow_circle: SLA Missed."));
}
