use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{
    AccessValue, OnewayValue, OvertakingValue, QuantityKeyword, RestrictionType, RestrictionValue,
    TurnRestrictionKind, Unit, ValueKind,
};

/// A number with an optional unit, separated by at most one space: `7.5 t`, `30mph`.
static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<amount>\d+(?:\.\d+)?)(?: ?(?P<unit>[^\s\d.][^\s]*))?$")
        .expect("quantity pattern is valid")
});

/// Imperial dimensions: `6'`, `6'6"`.
static FEET_INCHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<feet>\d+)'(?:(?P<inches>\d+(?:\.\d+)?)")?$"#)
        .expect("feet-inches pattern is valid")
});

/// Whether `token` is a legal value for keys of `restriction_type`.
pub fn is_known_restriction_value(restriction_type: RestrictionType, token: &str) -> bool {
    parse_restriction_value(restriction_type, token).is_some()
}

/// Read `token` against the vocabulary of `restriction_type`.
pub fn parse_restriction_value(
    restriction_type: RestrictionType,
    token: &str,
) -> Option<RestrictionValue> {
    match restriction_type.value_kind() {
        ValueKind::Access => AccessValue::from_str(token).ok().map(RestrictionValue::Access),
        ValueKind::Oneway => OnewayValue::from_str(token).ok().map(RestrictionValue::Oneway),
        ValueKind::Overtaking => OvertakingValue::from_str(token)
            .ok()
            .map(RestrictionValue::Overtaking),
        ValueKind::TurnRestriction => match TurnRestrictionKind::from_str(token) {
            Ok(kind) => Some(RestrictionValue::Turn(kind)),
            Err(_) => QuantityKeyword::from_str(token)
                .ok()
                .filter(|keyword| keyword.allowed_for(ValueKind::TurnRestriction))
                .map(RestrictionValue::Keyword),
        },
        kind => parse_quantity(kind, token),
    }
}

fn parse_quantity(kind: ValueKind, token: &str) -> Option<RestrictionValue> {
    if let Ok(keyword) = QuantityKeyword::from_str(token) {
        return keyword
            .allowed_for(kind)
            .then_some(RestrictionValue::Keyword(keyword));
    }

    if kind == ValueKind::Dimension {
        if let Some(caps) = FEET_INCHES.captures(token) {
            let feet: f64 = caps["feet"].parse().ok()?;
            let inches: f64 = match caps.name("inches") {
                Some(m) => m.as_str().parse().ok()?,
                None => 0.0,
            };
            return Some(RestrictionValue::Quantity {
                amount: feet + inches / 12.0,
                unit: Some(Unit::Feet),
            });
        }
    }

    let caps = QUANTITY.captures(token)?;
    let amount: f64 = caps["amount"].parse().ok()?;
    let unit = match caps.name("unit") {
        Some(m) => Some(Unit::from_str(m.as_str()).ok().filter(|u| u.kind() == kind)?),
        None => None,
    };
    // A bare number says nothing about how long one may stay.
    if kind == ValueKind::Duration && unit.is_none() {
        return None;
    }
    Some(RestrictionValue::Quantity { amount, unit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransportMode;
    use yare::parameterized;

    #[parameterized(
        access_no = { RestrictionType::Access, "no" },
        access_destination = { RestrictionType::Access, "destination" },
        mode_delivery = { RestrictionType::Transport(TransportMode::Hgv), "delivery" },
        oneway_reverse = { RestrictionType::Oneway, "-1" },
        oneway_reversible = { RestrictionType::Oneway, "reversible" },
        overtaking_caution = { RestrictionType::Overtaking, "caution" },
        weight_bare = { RestrictionType::Maxweight, "7.5" },
        weight_tonnes = { RestrictionType::Maxweight, "7.5 t" },
        weight_no_space = { RestrictionType::Maxaxleload, "10t" },
        weight_none = { RestrictionType::Maxweightrating, "none" },
        height_metres = { RestrictionType::Maxheight, "3.8 m" },
        height_feet_inches = { RestrictionType::Maxheight, "12'6\"" },
        height_feet = { RestrictionType::Maxwidth, "8'" },
        speed_bare = { RestrictionType::Maxspeed, "50" },
        speed_mph = { RestrictionType::Maxspeed, "30 mph" },
        speed_kmh = { RestrictionType::Minspeed, "60 km/h" },
        speed_walk = { RestrictionType::Maxspeed, "walk" },
        stay_hours = { RestrictionType::Maxstay, "2 hours" },
        stay_minutes = { RestrictionType::Maxstay, "30 min" },
        stay_unlimited = { RestrictionType::Maxstay, "unlimited" },
        turn_kind = { RestrictionType::Restriction, "no_right_turn" },
        turn_lifted = { RestrictionType::Restriction, "none" },
        turn_only_u = { RestrictionType::Restriction, "only_u_turn" },
    )]
    fn test_known_values(restriction_type: RestrictionType, token: &str) {
        assert!(is_known_restriction_value(restriction_type, token));
    }

    #[parameterized(
        access_unknown = { RestrictionType::Access, "notallowed" },
        access_case = { RestrictionType::Access, "No" },
        access_empty = { RestrictionType::Access, "" },
        access_number = { RestrictionType::Access, "30" },
        oneway_access_word = { RestrictionType::Oneway, "private" },
        weight_wrong_unit = { RestrictionType::Maxweight, "7.5 m" },
        weight_two_spaces = { RestrictionType::Maxweight, "7.5  t" },
        weight_walk = { RestrictionType::Maxweight, "walk" },
        weight_trailing_dot = { RestrictionType::Maxweight, "7." },
        weight_feet_inches = { RestrictionType::Maxweight, "6'6\"" },
        speed_unknown_unit = { RestrictionType::Maxspeed, "50 furlongs" },
        stay_bare_number = { RestrictionType::Maxstay, "2" },
        stay_no_limit = { RestrictionType::Maxstay, "none" },
        turn_unknown = { RestrictionType::Restriction, "no_parking" },
        turn_quantity = { RestrictionType::Restriction, "30" },
    )]
    fn test_unknown_values(restriction_type: RestrictionType, token: &str) {
        assert!(!is_known_restriction_value(restriction_type, token));
    }

    #[test]
    fn test_parse_quantity_value() {
        let value = parse_restriction_value(RestrictionType::Maxweight, "3.5 t").unwrap();
        assert_eq!(
            value,
            RestrictionValue::Quantity {
                amount: 3.5,
                unit: Some(Unit::Tonnes)
            }
        );
    }

    #[test]
    fn test_parse_feet_inches_value() {
        let value = parse_restriction_value(RestrictionType::Maxheight, "6'6\"").unwrap();
        assert_eq!(
            value,
            RestrictionValue::Quantity {
                amount: 6.5,
                unit: Some(Unit::Feet)
            }
        );
    }

    #[test]
    fn test_parse_access_value() {
        let value = parse_restriction_value(RestrictionType::Access, "use_sidepath").unwrap();
        assert_eq!(value, RestrictionValue::Access(AccessValue::UseSidepath));
    }
}
