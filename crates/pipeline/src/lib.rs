//! Typed workflow declarations for the flowhook scheduler.
//!
//! A [`Dag`] bundles a schedule, per-task defaults, and shell tasks with
//! explicit upstream dependencies. Declarations are plain data: this crate
//! validates graph shape, resolves layered parameters, and renders command
//! templates, while scheduling and execution stay in the engine that
//! consumes the exported JSON.
//!
//! # Usage
//!
//! ```
//! use pipeline::{BashTask, Dag, DagRegistry, Schedule, StartDate};
//!
//! let dag = Dag::new("nightly_report", Schedule::daily(), StartDate::days_ago(1))
//!     .with_task(BashTask::new("collect", "date"))
//!     .with_task(BashTask::new("publish", "echo done").after("collect"));
//!
//! let mut registry = DagRegistry::new();
//! registry.register(dag).expect("valid declaration");
//! ```
//!
//! # Architecture
//!
//! - [`Dag`] / [`BashTask`] / [`TaskDefaults`] describe the workflow
//! - [`DagRegistry`] validates declarations and exports them as JSON
//! - [`template`] renders command templates with the `ds_add` and `range`
//!   helpers

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dag;
pub mod error;
pub mod params;
pub mod registry;
pub mod schedule;
pub mod task;
pub mod template;

pub use dag::Dag;
pub use error::DagError;
pub use params::Params;
pub use registry::DagRegistry;
pub use schedule::{Schedule, StartDate};
pub use task::{BashTask, TaskDefaults};
pub use template::{render_command, TemplateContext};
