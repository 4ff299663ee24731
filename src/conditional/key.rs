use std::str::FromStr;

use crate::error::{GrammarError, KeyRule};
use crate::types::{CONDITIONAL_SUFFIX, ConditionalKey, Direction, RestrictionType, TransportMode};

/// Whether a tag key belongs to the conditional restriction grammar at all.
pub fn is_conditional_key(key: &str) -> bool {
    key.rsplit_once(':')
        .is_some_and(|(_, last)| last == CONDITIONAL_SUFFIX)
}

/// Decompose `<restriction-type>[:<transportation mode>][:<direction>]:conditional`.
pub fn parse_key(key: &str) -> Result<ConditionalKey, GrammarError> {
    let segments: Vec<&str> = key.split(':').collect();
    if !(2..=4).contains(&segments.len()) {
        return Err(GrammarError::key(key, KeyRule::SegmentCount));
    }

    let Some((last, rest)) = segments.split_last() else {
        return Err(GrammarError::key(key, KeyRule::SegmentCount));
    };
    if *last != CONDITIONAL_SUFFIX {
        return Err(GrammarError::key(key, KeyRule::MissingConditionalSuffix));
    }
    let Some((first, middle)) = rest.split_first() else {
        return Err(GrammarError::key(key, KeyRule::SegmentCount));
    };

    let restriction_type = RestrictionType::from_str(first)
        .map_err(|_| GrammarError::key(key, KeyRule::UnknownRestrictionType))?;
    let parsed = ConditionalKey::new(restriction_type);

    // A transport mode can not qualify a key that already is a transport mode.
    let mode = |segment: &str| {
        TransportMode::from_str(segment)
            .ok()
            .filter(|_| !restriction_type.is_transport_mode())
    };
    let direction = |segment: &str| Direction::from_str(segment).ok();

    match middle {
        [] => Ok(parsed),
        [segment] => {
            if let Some(direction) = direction(*segment) {
                Ok(parsed.with_direction(direction))
            } else if let Some(mode) = mode(*segment) {
                Ok(parsed.with_transport_mode(mode))
            } else {
                Err(GrammarError::key(key, KeyRule::UnexpectedSegment))
            }
        }
        [mode_segment, direction_segment] => match (mode(*mode_segment), direction(*direction_segment)) {
            (Some(mode), Some(direction)) => Ok(parsed
                .with_transport_mode(mode)
                .with_direction(direction)),
            _ => Err(GrammarError::key(key, KeyRule::UnexpectedSegment)),
        },
        _ => Err(GrammarError::key(key, KeyRule::SegmentCount)),
    }
}
