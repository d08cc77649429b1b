//! The dag declaration itself: identity, schedule, defaults, tasks.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DagError;
use crate::params::Params;
use crate::schedule::{Schedule, StartDate};
use crate::task::{BashTask, TaskDefaults};
use crate::template::{render_command, TemplateContext};

/// A declared workflow: schedule, per-task defaults, and shell tasks with
/// explicit upstream dependencies.
///
/// `Dag` is plain declaration data. [`Dag::validate`] checks the shape of
/// the task graph; scheduling and execution belong to the engine that
/// consumes the exported JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dag {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schedule: Schedule,
    pub start_date: StartDate,
    #[serde(default)]
    pub defaults: TaskDefaults,
    /// Third-class parameter layer, the lowest precedence.
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<BashTask>,
    /// Markdown documentation surfaced by UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Dag {
    #[must_use]
    pub fn new(id: impl Into<String>, schedule: Schedule, start_date: StartDate) -> Self {
        Self {
            id: id.into(),
            description: None,
            schedule,
            start_date,
            defaults: TaskDefaults::default(),
            params: Params::new(),
            tasks: Vec::new(),
            doc: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: TaskDefaults) -> Self {
        self.defaults = defaults;
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

    /// Appends a task. Declaration order is preserved in exports.
    #[must_use]
    pub fn with_task(mut self, task: BashTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&BashTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Effective `depends_on_past` for a task: its own override, otherwise
    /// the dag default.
    #[must_use]
    pub fn depends_on_past_for(&self, task: &BashTask) -> bool {
        task.depends_on_past.unwrap_or(self.defaults.depends_on_past)
    }

    /// Checks declaration hygiene: unique task ids, dependencies that refer
    /// to declared tasks, and an acyclic graph.
    pub fn validate(&self) -> Result<(), DagError> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(DagError::DuplicateTask {
                    dag: self.id.clone(),
                    task: task.id.clone(),
                });
            }
        }

        for task in &self.tasks {
            for dependency in &task.depends_on {
                if !seen.contains(dependency.as_str()) {
                    return Err(DagError::UnknownDependency {
                        dag: self.id.clone(),
                        task: task.id.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        self.check_acyclic()
    }

    /// Depth-first walk over dependency edges with a three-state mark.
    fn check_acyclic(&self) -> Result<(), DagError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        fn visit(
            dag: &Dag,
            index: &HashMap<&str, usize>,
            marks: &mut [Mark],
            node: usize,
        ) -> Result<(), DagError> {
            marks[node] = Mark::Active;
            for dependency in &dag.tasks[node].depends_on {
                // unknown dependencies were already rejected
                let Some(&next) = index.get(dependency.as_str()) else {
                    continue;
                };
                match marks[next] {
                    Mark::Done => {}
                    Mark::Active => {
                        return Err(DagError::DependencyCycle {
                            dag: dag.id.clone(),
                            task: dag.tasks[next].id.clone(),
                        });
                    }
                    Mark::New => visit(dag, index, marks, next)?,
                }
            }
            marks[node] = Mark::Done;
            Ok(())
        }

        let index: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(position, task)| (task.id.as_str(), position))
            .collect();
        let mut marks = vec![Mark::New; self.tasks.len()];

        for node in 0..self.tasks.len() {
            if marks[node] == Mark::New {
                visit(self, &index, &mut marks, node)?;
            }
        }
        Ok(())
    }

    /// Resolves the three parameter layers for a task: dag params lowest,
    /// dag defaults over them, task params on top.
    pub fn params_for(&self, task_id: &str) -> Result<Params, DagError> {
        let task = self.task(task_id).ok_or_else(|| DagError::UnknownTask {
            dag: self.id.clone(),
            task: task_id.to_string(),
        })?;
        Ok(self
            .params
            .overlaid(&self.defaults.params)
            .overlaid(&task.params))
    }

    /// Renders a task's command template for the given execution date,
    /// with that task's resolved parameters in scope.
    pub fn render_command(&self, task_id: &str, ds: NaiveDate) -> Result<String, DagError> {
        let task = self.task(task_id).ok_or_else(|| DagError::UnknownTask {
            dag: self.id.clone(),
            task: task_id.to_string(),
        })?;
        let params = self
            .params
            .overlaid(&self.defaults.params)
            .overlaid(&task.params);
        render_command(&task.command, &TemplateContext::new(ds, params))
    }
}
