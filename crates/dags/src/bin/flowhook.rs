//! flowhook command-line interface.
//!
//! Inspects the shipped dag declarations, exports them for the scheduler,
//! renders command templates, and exercises the alert webhook end to end.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use alerts::{EnvConnections, ExecutionContext};
use dags::slack_usage;

#[derive(Parser)]
#[command(name = "flowhook")]
#[command(about = "Inspect and exercise flowhook dag declarations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every declared dag and print a summary
    Check,
    /// Print all declarations as JSON for the scheduler
    Export,
    /// Render a task's command template
    Render {
        /// Dag id
        #[arg(long)]
        dag: String,
        /// Task id
        #[arg(long)]
        task: String,
        /// Execution date (YYYY-MM-DD), defaults to today UTC
        #[arg(long)]
        ds: Option<NaiveDate>,
    },
    /// Send a sample alert through the configured webhook
    TestAlert {
        /// Which event to simulate
        #[arg(long, value_enum, default_value_t = Kind::Failure)]
        kind: Kind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Failure,
    SlaMiss,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("flowhook=info".parse()?)
                .add_directive("alerts=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check(),
        Commands::Export => export(),
        Commands::Render { dag, task, ds } => render(&dag, &task, ds),
        Commands::TestAlert { kind } => test_alert(kind).await,
    }
}

fn check() -> Result<()> {
    let registry = dags::registry()?;
    for dag in registry.iter() {
        println!(
            "{}: {} tasks, every {}s",
            dag.id,
            dag.tasks.len(),
            dag.schedule.interval_secs
        );
    }
    println!("{} dag(s) ok", registry.len());
    Ok(())
}

fn export() -> Result<()> {
    let registry = dags::registry()?;
    println!("{}", registry.export_json()?);
    Ok(())
}

fn render(dag_id: &str, task_id: &str, ds: Option<NaiveDate>) -> Result<()> {
    let registry = dags::registry()?;
    let dag = registry
        .get(dag_id)
        .with_context(|| format!("no dag `{dag_id}`"))?;
    let ds = ds.unwrap_or_else(|| Utc::now().date_naive());

    println!("{}", dag.render_command(task_id, ds)?);
    Ok(())
}

async fn test_alert(kind: Kind) -> Result<()> {
    let alerter = slack_usage::alerter(Arc::new(EnvConnections::new()));
    let context = ExecutionContext::new(
        "print_date",
        slack_usage::DAG_ID,
        Utc::now(),
        "http://scheduler.internal/log/print_date",
    );

    match kind {
        Kind::Failure => alerter.on_task_failure(&context).await?,
        Kind::SlaMiss => alerter.on_sla_miss(&context).await?,
    }

    info!("Test alert delivered");
    Ok(())
}
