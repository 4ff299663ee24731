//! Parsed forms of a conditional restriction tag.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::turn_restriction::TurnRestrictionKind;
use super::vocabulary::{
    AccessValue, Direction, OnewayValue, OvertakingValue, QuantityKeyword, RestrictionType,
    TransportMode, Unit,
};

/// Literal last segment of every conditional key.
pub const CONDITIONAL_SUFFIX: &str = "conditional";

/// A decomposed `<restriction-type>[:<transportation mode>][:<direction>]:conditional` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ConditionalKey {
    pub restriction_type: RestrictionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl ConditionalKey {
    pub fn new(restriction_type: RestrictionType) -> Self {
        Self {
            restriction_type,
            transport_mode: None,
            direction: None,
        }
    }

    pub fn with_transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = Some(mode);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// Renders the canonical key, e.g. `maxweight:hgv:forward:conditional`.
impl Display for ConditionalKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.restriction_type)?;
        if let Some(mode) = &self.transport_mode {
            write!(f, ":{mode}")?;
        }
        if let Some(direction) = &self.direction {
            write!(f, ":{direction}")?;
        }
        write!(f, ":{CONDITIONAL_SUFFIX}")
    }
}

/// The typed left-hand side of a `<value> @ (<condition>)` clause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RestrictionValue {
    Access(AccessValue),
    Oneway(OnewayValue),
    Overtaking(OvertakingValue),
    Quantity { amount: f64, unit: Option<Unit> },
    Keyword(QuantityKeyword),
    Turn(TurnRestrictionKind),
}

impl Display for RestrictionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RestrictionValue::Access(v) => write!(f, "{v}"),
            RestrictionValue::Oneway(v) => write!(f, "{v}"),
            RestrictionValue::Overtaking(v) => write!(f, "{v}"),
            RestrictionValue::Quantity { amount, unit: None } => write!(f, "{amount}"),
            RestrictionValue::Quantity {
                amount,
                unit: Some(unit),
            } => write!(f, "{amount} {unit}"),
            RestrictionValue::Keyword(k) => write!(f, "{k}"),
            RestrictionValue::Turn(kind) => write!(f, "{kind}"),
        }
    }
}

/// One `<value> @ (<condition>)` clause. `condition` is the text between the
/// outer parentheses, untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub value: RestrictionValue,
    pub condition: String,
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} @ ({})", self.value, self.condition)
    }
}

/// All clauses of a conditional value, in the order they were written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ConditionSet(pub Vec<Condition>);

impl ConditionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.0.iter()
    }
}

impl Display for ConditionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.iter().join(";"))
    }
}
