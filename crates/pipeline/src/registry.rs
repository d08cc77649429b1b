//! Registry of validated dag declarations.

use std::collections::BTreeMap;

use tracing::debug;

use crate::dag::Dag;
use crate::error::DagError;

/// Validated collection of dag declarations, keyed by id.
///
/// Registration is the single entry point: a dag that fails validation or
/// reuses an id never becomes visible to the export.
#[derive(Debug, Default)]
pub struct DagRegistry {
    dags: BTreeMap<String, Dag>,
}

impl DagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a dag declaration.
    pub fn register(&mut self, dag: Dag) -> Result<(), DagError> {
        dag.validate()?;
        if self.dags.contains_key(&dag.id) {
            return Err(DagError::DuplicateDag(dag.id));
        }

        debug!(dag = %dag.id, tasks = dag.tasks.len(), "Registered dag");
        self.dags.insert(dag.id.clone(), dag);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Dag> {
        self.dags.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dag> {
        self.dags.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dags.is_empty()
    }

    /// Serializes every registered dag for the external scheduler.
    pub fn export_json(&self) -> Result<String, DagError> {
        let dags: Vec<&Dag> = self.dags.values().collect();
        Ok(serde_json::to_string_pretty(&dags)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Schedule, StartDate};
    use crate::task::BashTask;

    fn dag(id: &str) -> Dag {
        Dag::new(id, Schedule::daily(), StartDate::days_ago(1))
            .with_task(BashTask::new("print_date", "date"))
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = DagRegistry::new();
        registry.register(dag("etl")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("etl").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_dag_rejected() {
        let mut registry = DagRegistry::new();
        registry.register(dag("etl")).unwrap();

        assert!(matches!(
            registry.register(dag("etl")),
            Err(DagError::DuplicateDag(id)) if id == "etl"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_dag_never_registered() {
        let broken = Dag::new("broken", Schedule::daily(), StartDate::days_ago(1))
            .with_task(BashTask::new("a", "date").after("ghost"));

        let mut registry = DagRegistry::new();
        assert!(registry.register(broken).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_export_round_trips() {
        let mut registry = DagRegistry::new();
        registry.register(dag("etl")).unwrap();

        let json = registry.export_json().unwrap();
        let parsed: Vec<Dag> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "etl");
        assert_eq!(parsed[0].tasks[0].command, "date");
    }
}
