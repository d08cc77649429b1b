//! Error types for workflow declarations.

use thiserror::Error;

/// Errors produced while declaring, validating, or rendering workflows.
#[derive(Debug, Error)]
pub enum DagError {
    /// Two tasks in the same dag share an id.
    #[error("duplicate task id `{task}` in dag `{dag}`")]
    DuplicateTask { dag: String, task: String },

    /// A task names an upstream dependency that is not declared.
    #[error("task `{task}` in dag `{dag}` depends on unknown task `{dependency}`")]
    UnknownDependency {
        dag: String,
        task: String,
        dependency: String,
    },

    /// The dependency graph is not acyclic.
    #[error("dependency cycle in dag `{dag}` involving task `{task}`")]
    DependencyCycle { dag: String, task: String },

    /// A lookup referenced a task id the dag does not declare.
    #[error("dag `{dag}` has no task `{task}`")]
    UnknownTask { dag: String, task: String },

    /// The registry already holds a dag with this id.
    #[error("dag `{0}` is already registered")]
    DuplicateDag(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("failed to serialize declarations: {0}")]
    Serialize(#[from] serde_json::Error),
}
