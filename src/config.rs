//! Check configuration, read from the same JSON document shape map-check
//! hosts use for their rule settings.
//!
//! ```json
//! {
//!   "invalid_turn_restriction": { "enabled": true, "classification_tag": "highway" },
//!   "conditional_restriction": { "enabled": false }
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CheckError;

pub const DEFAULT_CLASSIFICATION_TAG: &str = "highway";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TurnRestrictionConfig {
    pub enabled: bool,
    /// Tag every from/via/to edge has to carry.
    pub classification_tag: String,
    /// Reject relations whose members do not connect (where endpoints are known).
    pub check_connectivity: bool,
}

impl Default for TurnRestrictionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            classification_tag: DEFAULT_CLASSIFICATION_TAG.to_string(),
            check_connectivity: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ConditionalRestrictionConfig {
    pub enabled: bool,
}

impl Default for ConditionalRestrictionConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksConfig {
    pub invalid_turn_restriction: TurnRestrictionConfig,
    pub conditional_restriction: ConditionalRestrictionConfig,
}

impl ChecksConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self, CheckError> {
        let config: ChecksConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CheckError> {
        if self
            .invalid_turn_restriction
            .classification_tag
            .trim()
            .is_empty()
        {
            return Err(CheckError::InvalidConfig(
                "invalid_turn_restriction.classification_tag must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
