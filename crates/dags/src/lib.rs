//! Dag declarations shipped with flowhook.
//!
//! Each module declares one dag; [`registry`] validates and collects them
//! all for export to the scheduler.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod slack_usage;

use pipeline::{DagError, DagRegistry};

/// Builds the registry of every dag this crate declares.
pub fn registry() -> Result<DagRegistry, DagError> {
    let mut registry = DagRegistry::new();
    registry.register(slack_usage::dag())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_holds_every_declaration() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(slack_usage::DAG_ID).is_some());
    }
}
