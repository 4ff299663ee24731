//! Findings handed back to the host.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entity::EntityId;

/// One finding: the entity that was checked, the entities the finding points
/// at, and the fully rendered message.
///
/// # Fields
///
/// * `check` - Name of the check that produced the finding.
/// * `subject` - The entity the check ran on, e.g. the restriction relation.
/// * `entities` - The offending entities, ordered and without duplicates. For
///   a malformed relation these are all its members; for a bad conditional
///   tag it is the tagged entity itself.
/// * `message` - Final text for report consumers, placeholders already filled.
///
/// # Example
///
/// ```ignore
/// use restriction_checks::{Diagnostic, EntityId};
///
/// let diagnostic = Diagnostic::new(
///     "InvalidTurnRestrictionCheck",
///     EntityId::relation(9),
///     [EntityId::edge(2)],
///     "relation is marked as turn restriction, but one of its members has no classification tag",
/// );
/// assert_eq!(diagnostic.entities.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Diagnostic {
    /// Name of the check that produced this finding.
    pub check: String,
    pub subject: EntityId,
    pub entities: BTreeSet<EntityId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        check: impl Into<String>,
        subject: EntityId,
        entities: impl IntoIterator<Item = EntityId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check: check.into(),
            subject,
            entities: entities.into_iter().collect(),
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.check,
            self.subject,
            self.entities.iter().join(", "),
            self.message
        )
    }
}
