//! The checks a [`crate::ValidationEngine`] runs.

mod conditional_restriction;
mod invalid_turn_restriction;

pub use conditional_restriction::ConditionalRestrictionCheck;
pub use invalid_turn_restriction::{
    InvalidTurnRestrictionCheck, MALFORMED_RELATION_MESSAGE, MISSING_CLASSIFICATION_MESSAGE,
};
