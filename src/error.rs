use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// The grammar rule a conditional key broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum KeyRule {
    /// Fewer than two or more than four colon-separated segments.
    SegmentCount,
    /// The first segment is not a known restriction type.
    UnknownRestrictionType,
    /// A middle segment is neither a transport mode nor a direction, or is out of order.
    UnexpectedSegment,
    /// The last segment is not the literal `conditional`.
    MissingConditionalSuffix,
}

/// The grammar rule a conditional value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ValueRule {
    /// Nothing between two `;` separators (or an empty value).
    EmptyClause,
    /// No ` @ ` separator with exactly one space on each side.
    MissingSeparator,
    /// The restriction value token is empty or padded with whitespace.
    MalformedValueToken,
    /// The condition does not start with `(` or its closing `)` is not the last character.
    UnparenthesizedCondition,
    /// Parentheses do not balance.
    UnbalancedParentheses,
    /// Nothing but whitespace inside the parentheses.
    EmptyCondition,
    /// The token is not in the vocabulary of the key's restriction type.
    UnknownRestrictionValue,
}

/// A conditional tag that does not follow the conditional restriction mini-language.
///
/// The `Display` output is the exact message handed to report consumers; the
/// `rule` payload is for callers that want to know which rule failed. Unknown
/// vocabulary and bad syntax intentionally render the same value message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GrammarError {
    #[error(
        "The conditional key {key} does not respect the \"<restriction-type>[:<transportation mode>][:<direction>]:conditional\" format"
    )]
    Key { key: String, rule: KeyRule },

    #[error(
        "The conditional value {value} does not respect the format \"<restriction-value> @ <condition>[;<restriction-value> @ <condition>]\" "
    )]
    Value { value: String, rule: ValueRule },
}

impl GrammarError {
    pub(crate) fn key(key: &str, rule: KeyRule) -> Self {
        GrammarError::Key {
            key: key.to_string(),
            rule,
        }
    }

    pub(crate) fn value(value: &str, rule: ValueRule) -> Self {
        GrammarError::Value {
            value: value.to_string(),
            rule,
        }
    }

    /// Name of the rule that failed, e.g. `missing_separator`.
    pub fn rule_name(&self) -> &'static str {
        match self {
            GrammarError::Key { rule, .. } => (*rule).into(),
            GrammarError::Value { rule, .. } => (*rule).into(),
        }
    }
}

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum CheckError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::InvalidConfig(err.to_string())
    }
}
