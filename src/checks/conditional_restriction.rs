use tracing::debug;

use crate::conditional::{is_conditional_key, parse_key, parse_value};
use crate::error::GrammarError;
use crate::traits::{Check, EntityStore};
use crate::types::{Diagnostic, Entity};

/// Flags `*:conditional` tags whose key or value does not follow the
/// conditional restriction grammar. One finding per offending key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionalRestrictionCheck;

impl ConditionalRestrictionCheck {
    pub const NAME: &'static str = "ConditionalRestrictionCheck";

    pub fn new() -> Self {
        Self
    }

    /// Check every conditional tag of `entity`, in key order.
    pub fn validate(&self, entity: &Entity) -> Vec<Diagnostic> {
        entity
            .tags()
            .iter()
            .filter(|(key, _)| is_conditional_key(key))
            .filter_map(|(key, value)| {
                check_tag(key, value).err().map(|err| {
                    debug!(
                        event = "Check",
                        phase = "Grammar",
                        entity = %entity.id(),
                        key = key.as_str(),
                        rule = err.rule_name()
                    );
                    Diagnostic::new(Self::NAME, entity.id(), [entity.id()], err.to_string())
                })
            })
            .collect()
    }
}

/// The key is checked first; its value only once the key parses.
fn check_tag(key: &str, value: &str) -> Result<(), GrammarError> {
    let parsed = parse_key(key)?;
    parse_value(parsed.restriction_type, value)?;
    Ok(())
}

impl Check for ConditionalRestrictionCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn applies_to(&self, entity: &Entity) -> bool {
        entity.tags().keys().any(|key| is_conditional_key(key))
    }

    fn flag(&self, entity: &Entity, _store: &dyn EntityStore) -> Vec<Diagnostic> {
        self.validate(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityId;
    use yare::parameterized;

    fn way(key: &str, value: &str) -> Entity {
        Entity::edge(7)
            .with_tag("highway", "residential")
            .with_tag(key, value)
    }

    #[parameterized(
        access = { "access:conditional", "no @ (Sa 08:00-16:00)" },
        mode = { "hgv:conditional", "delivery @ (Mo-Fr 06:00-11:00);no @ (Sa)" },
        weight = { "maxweight:hgv:conditional", "7.5 t @ (wet)" },
        speed_direction = { "maxspeed:forward:conditional", "30 @ (22:00-06:00)" },
        stay = { "maxstay:conditional", "2 hours @ (Mo-Fr 08:00-18:00)" },
    )]
    fn test_valid_conditional_tags(key: &str, value: &str) {
        let check = ConditionalRestrictionCheck::new();
        assert!(check.validate(&way(key, value)).is_empty());
    }

    #[parameterized(
        bad_key = {
            "hgv:maxweight:conditional", "7.5 t @ (wet)",
            "The conditional key hgv:maxweight:conditional does not respect the \"<restriction-type>[:<transportation mode>][:<direction>]:conditional\" format"
        },
        bad_format = {
            "access:conditional", "no@(Sa 08:00-16:00)",
            "The conditional value no@(Sa 08:00-16:00) does not respect the format \"<restriction-value> @ <condition>[;<restriction-value> @ <condition>]\" "
        },
        bad_access_value = {
            "access:conditional", "notallowed @ (Sa 08:00-16:00)",
            "The conditional value notallowed @ (Sa 08:00-16:00) does not respect the format \"<restriction-value> @ <condition>[;<restriction-value> @ <condition>]\" "
        },
    )]
    fn test_invalid_conditional_tags(key: &str, value: &str, message: &str) {
        let check = ConditionalRestrictionCheck::new();
        let diagnostics = check.validate(&way(key, value));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, message);
        assert_eq!(diagnostics[0].check, "ConditionalRestrictionCheck");
        assert_eq!(
            diagnostics[0].entities.iter().copied().collect::<Vec<_>>(),
            vec![EntityId::edge(7)]
        );
    }

    #[test]
    fn test_bad_key_hides_bad_value() {
        let check = ConditionalRestrictionCheck::new();
        let diagnostics = check.validate(&way("hgv:maxweight:conditional", "garbage"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("The conditional key"));
    }

    #[test]
    fn test_each_offending_key_is_reported() {
        let check = ConditionalRestrictionCheck::new();
        let entity = Entity::edge(3)
            .with_tag("access:conditional", "no@(Sa)")
            .with_tag("hgv:maxweight:conditional", "no @ (Sa)")
            .with_tag("maxspeed:conditional", "30 @ (wet)");
        let diagnostics = check.validate(&entity);
        assert_eq!(diagnostics.len(), 2);
        // BTreeMap order: access:* before hgv:*
        assert!(diagnostics[0].message.contains("no@(Sa)"));
        assert!(diagnostics[1].message.contains("hgv:maxweight:conditional"));
    }

    #[test]
    fn test_applies_to_entities_with_conditional_keys() {
        let check = ConditionalRestrictionCheck::new();
        assert!(check.applies_to(&way("access:conditional", "no @ (Sa)")));
        assert!(!check.applies_to(&Entity::edge(1).with_tag("access", "no")));
    }
}
