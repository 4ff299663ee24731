// src/lib.rs
pub use engine::ValidationEngine;
pub use error::{CheckError, GrammarError, KeyRule, ValueRule};
pub use traits::{Check, EntityStore};
pub use types::{
    ConditionSet, ConditionalKey, Diagnostic, Entity, EntityId, ItemType, MapDataset,
    RestrictionType, TurnRestriction,
};

pub mod checks;
pub mod conditional;
pub mod config;
pub mod metrics;
pub mod types;

mod engine;
mod error;
mod traits;
