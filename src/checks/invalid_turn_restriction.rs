use std::str::FromStr;

use tracing::debug;

use crate::config::TurnRestrictionConfig;
use crate::traits::{Check, EntityStore};
use crate::types::{
    ConnectivityRule, Diagnostic, Entity, EntityId, ItemType, MemberRole, TurnRestriction,
    is_turn_restriction,
};

pub const MALFORMED_RELATION_MESSAGE: &str = "relation is marked as turn restriction, but it is not a well-formed relation (missing required members)";
pub const MISSING_CLASSIFICATION_MESSAGE: &str =
    "relation is marked as turn restriction, but one of its members has no classification tag";

/// Flags turn-restriction relations that do not resolve into a from/via/to
/// route, or whose route edges lack the classification tag.
#[derive(Debug, Clone)]
pub struct InvalidTurnRestrictionCheck {
    classification_tag: String,
    connectivity: ConnectivityRule,
}

impl Default for InvalidTurnRestrictionCheck {
    fn default() -> Self {
        Self::new(&TurnRestrictionConfig::default())
    }
}

impl InvalidTurnRestrictionCheck {
    pub const NAME: &'static str = "InvalidTurnRestrictionCheck";

    pub fn new(config: &TurnRestrictionConfig) -> Self {
        Self {
            classification_tag: config.classification_tag.clone(),
            connectivity: if config.check_connectivity {
                ConnectivityRule::Enforce
            } else {
                ConnectivityRule::Ignore
            },
        }
    }

    pub fn classification_tag(&self) -> &str {
        &self.classification_tag
    }

    /// Validate one restriction relation. At most one finding per relation:
    /// a malformed relation is never also checked for missing tags.
    pub fn validate(&self, relation: &Entity, store: &dyn EntityStore) -> Option<Diagnostic> {
        if let Err(err) = TurnRestriction::from_relation_with(relation, store, self.connectivity) {
            debug!(
                event = "Check",
                phase = "Topology",
                relation = %relation.id(),
                reason = %err
            );
            return Some(Diagnostic::new(
                Self::NAME,
                relation.id(),
                relation.members().iter().map(|m| m.member),
                MALFORMED_RELATION_MESSAGE,
            ));
        }

        let unclassified: Vec<EntityId> = relation
            .members()
            .iter()
            .filter(|m| m.member.kind == ItemType::Edge && MemberRole::from_str(&m.role).is_ok())
            .filter_map(|m| store.entity(&m.member))
            .filter(|edge| !edge.has_tag(&self.classification_tag))
            .map(|edge| edge.id())
            .collect();

        if unclassified.is_empty() {
            return None;
        }
        debug!(
            event = "Check",
            phase = "Classification",
            relation = %relation.id(),
            tag = self.classification_tag.as_str(),
            members = unclassified.len()
        );
        Some(Diagnostic::new(
            Self::NAME,
            relation.id(),
            unclassified,
            MISSING_CLASSIFICATION_MESSAGE,
        ))
    }
}

impl Check for InvalidTurnRestrictionCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn applies_to(&self, entity: &Entity) -> bool {
        is_turn_restriction(entity)
    }

    fn flag(&self, entity: &Entity, store: &dyn EntityStore) -> Vec<Diagnostic> {
        self.validate(entity, store).into_iter().collect()
    }
}
