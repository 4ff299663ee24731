use crate::types::{Diagnostic, Entity, EntityId};

/// Read access to the dataset a check runs against.
///
/// Relations reference their members by [`EntityId`]; checks resolve them
/// through this lookup instead of holding references into the dataset.
pub trait EntityStore {
    fn entity(&self, id: &EntityId) -> Option<&Entity>;
}

/// A validation rule over single entities.
pub trait Check: Send + Sync {
    /// Stable name reported in every [`Diagnostic`] this check produces.
    fn name(&self) -> &'static str;

    /// Whether the entity falls under this check at all. Entities outside
    /// the precondition never produce findings.
    fn applies_to(&self, entity: &Entity) -> bool;

    /// Run the check on an entity for which [`Check::applies_to`] holds.
    fn flag(&self, entity: &Entity, store: &dyn EntityStore) -> Vec<Diagnostic>;
}
