use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::checks::{ConditionalRestrictionCheck, InvalidTurnRestrictionCheck};
use crate::config::ChecksConfig;
use crate::error::CheckError;
use crate::metrics;
use crate::traits::{Check, EntityStore};
use crate::types::{Diagnostic, Entity};

/// Runs every enabled check against one entity at a time. Cloneable and
/// thread-safe; holds no per-entity state.
#[derive(Clone)]
pub struct ValidationEngine {
    checks: Vec<Arc<dyn Check>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::from_config(&ChecksConfig::default())
    }
}

impl ValidationEngine {
    pub fn new(config: ChecksConfig) -> Result<Self, CheckError> {
        config.validate()?;
        Ok(Self::from_config(&config))
    }

    pub fn new_from_json(text: &str) -> Result<Self, CheckError> {
        let config = ChecksConfig::from_json_str(text)?;
        Ok(Self::from_config(&config))
    }

    fn from_config(config: &ChecksConfig) -> Self {
        let mut checks: Vec<Arc<dyn Check>> = Vec::new();
        if config.invalid_turn_restriction.enabled {
            checks.push(Arc::new(InvalidTurnRestrictionCheck::new(
                &config.invalid_turn_restriction,
            )));
        }
        if config.conditional_restriction.enabled {
            checks.push(Arc::new(ConditionalRestrictionCheck::new()));
        }
        ValidationEngine { checks }
    }

    /// Add a host-provided check after the built-in ones.
    pub fn with_check(mut self, check: Arc<dyn Check>) -> Self {
        self.checks.push(check);
        self
    }

    /// Names of the enabled checks, in run order.
    pub fn checks(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn validate(&self, store: &dyn EntityStore, entity: &Entity) -> Vec<Diagnostic> {
        let started = Instant::now();
        let mut diagnostics = Vec::new();
        let mut checks_run = 0;

        for check in self.checks.iter().filter(|c| c.applies_to(entity)) {
            let check_started = Instant::now();
            let found = check.flag(entity, store);
            checks_run += 1;

            debug!(
                event = "Validate",
                phase = "Check",
                check = check.name(),
                entity = %entity.id(),
                diagnostics = found.len()
            );
            metrics::record_check(check.name(), entity.id(), check_started.elapsed(), found.len());

            for diagnostic in &found {
                info!(
                    event = "Validate",
                    phase = "Diagnostic",
                    check = diagnostic.check.as_str(),
                    entity = %diagnostic.subject,
                    message = diagnostic.message.as_str()
                );
            }
            diagnostics.extend(found);
        }

        metrics::record_entity(entity.id(), started.elapsed(), checks_run, diagnostics.len());
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, MapDataset};

    struct NamedCheck;

    impl Check for NamedCheck {
        fn name(&self) -> &'static str {
            "NamedCheck"
        }

        fn applies_to(&self, entity: &Entity) -> bool {
            entity.has_tag("name")
        }

        fn flag(&self, entity: &Entity, _store: &dyn EntityStore) -> Vec<Diagnostic> {
            vec![Diagnostic::new(self.name(), entity.id(), [entity.id()], "named")]
        }
    }

    #[test]
    fn test_default_engine_runs_both_checks() {
        let engine = ValidationEngine::default();
        assert_eq!(
            engine.checks(),
            vec!["InvalidTurnRestrictionCheck", "ConditionalRestrictionCheck"]
        );
    }

    #[test]
    fn test_disabled_checks_are_skipped() {
        let engine = ValidationEngine::new_from_json(
            r#"{ "invalid_turn_restriction": { "enabled": false } }"#,
        )
        .unwrap();
        assert_eq!(engine.checks(), vec!["ConditionalRestrictionCheck"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ChecksConfig::default();
        config.invalid_turn_restriction.classification_tag = String::new();
        assert!(matches!(
            ValidationEngine::new(config),
            Err(CheckError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_entity_outside_every_precondition() {
        let engine = ValidationEngine::default();
        let entity = Entity::edge(1).with_tag("highway", "primary");
        assert!(engine.validate(&MapDataset::new(), &entity).is_empty());
    }

    #[test]
    fn test_host_check_runs_after_builtins() {
        let engine = ValidationEngine::default().with_check(Arc::new(NamedCheck));
        let entity = Entity::edge(5)
            .with_tag("name", "Main Street")
            .with_tag("access:conditional", "no@(Sa)");
        let diagnostics = engine.validate(&MapDataset::new(), &entity);
        let checks: Vec<&str> = diagnostics.iter().map(|d| d.check.as_str()).collect();
        assert_eq!(checks, vec!["ConditionalRestrictionCheck", "NamedCheck"]);
        assert!(diagnostics.iter().all(|d| d.subject == EntityId::edge(5)));
    }
}
