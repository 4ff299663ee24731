//! Data model shared by the checks.
//!
//! - [`Entity`] / [`EntityId`]: tagged map features and the arena keys that
//!   relations use to reference their members.
//! - [`ConditionalKey`] / [`ConditionSet`]: the parsed halves of a
//!   `*:conditional` tag.
//! - [`TurnRestriction`]: a restriction relation resolved into its route.
//! - [`Diagnostic`]: what a check hands back to the host.

mod conditional;
mod diagnostic;
mod entity;
mod turn_restriction;
mod vocabulary;

pub use conditional::{CONDITIONAL_SUFFIX, Condition, ConditionSet, ConditionalKey, RestrictionValue};
pub use diagnostic::Diagnostic;
pub use entity::{Entity, EntityId, ItemType, MapDataset, RelationMember};
pub use turn_restriction::{
    ConnectivityRule, MemberRole, TopologyError, TurnRestriction, TurnRestrictionKind, Via,
    is_turn_restriction, restriction_tag,
};
pub use vocabulary::{
    AccessValue, Direction, OnewayValue, OvertakingValue, QuantityKeyword, RestrictionType,
    TransportMode, Unit, ValueKind,
};
