use crate::error::{GrammarError, ValueRule};
use crate::types::{Condition, ConditionSet, RestrictionType};

use super::restriction_value::parse_restriction_value;

const SEPARATOR: &str = " @ ";

/// Split a conditional value on the `;` that sit outside parentheses.
///
/// Whitespace right after a `;` is dropped; the value itself is not trimmed.
/// Unbalanced parentheses and empty clauses are rejected here, before any
/// clause is looked at.
pub fn split_clauses(value: &str) -> Result<Vec<&str>, GrammarError> {
    let mut clauses = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (idx, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| GrammarError::value(value, ValueRule::UnbalancedParentheses))?;
            }
            ';' if depth == 0 => {
                clauses.push(clause_at(value, start, idx));
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(GrammarError::value(value, ValueRule::UnbalancedParentheses));
    }
    clauses.push(clause_at(value, start, value.len()));

    if clauses.iter().any(|clause| clause.trim().is_empty()) {
        return Err(GrammarError::value(value, ValueRule::EmptyClause));
    }
    Ok(clauses)
}

fn clause_at(value: &str, start: usize, end: usize) -> &str {
    let clause = &value[start..end];
    if start == 0 { clause } else { clause.trim_start() }
}

/// Split one clause into its value token and the text inside the parentheses.
fn split_clause(clause: &str) -> Result<(&str, &str), ValueRule> {
    let (token, condition) = clause
        .split_once(SEPARATOR)
        .ok_or(ValueRule::MissingSeparator)?;

    if token.is_empty() || token.trim() != token || token.contains('@') {
        return Err(ValueRule::MalformedValueToken);
    }
    if !condition.starts_with('(') {
        return Err(ValueRule::UnparenthesizedCondition);
    }

    // The parenthesis opened right after the separator has to close last.
    let mut depth: usize = 0;
    let mut close = None;
    for (idx, ch) in condition.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ValueRule::UnbalancedParentheses)?;
                if depth == 0 {
                    close = Some(idx);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close.ok_or(ValueRule::UnbalancedParentheses)?;
    if close != condition.len() - 1 {
        return Err(ValueRule::UnparenthesizedCondition);
    }

    let inner = &condition[1..close];
    if inner.trim().is_empty() {
        return Err(ValueRule::EmptyCondition);
    }
    Ok((token, inner))
}

/// Parse `<restriction-value> @ (<condition>)[;<restriction-value> @ (<condition>)]`.
///
/// The values are checked against the vocabulary of `restriction_type`; an
/// unknown value fails with the same message as a syntax error.
pub fn parse_value(
    restriction_type: RestrictionType,
    value: &str,
) -> Result<ConditionSet, GrammarError> {
    let mut conditions = Vec::new();
    for clause in split_clauses(value)? {
        let (token, condition) =
            split_clause(clause).map_err(|rule| GrammarError::value(value, rule))?;
        let parsed = parse_restriction_value(restriction_type, token)
            .ok_or_else(|| GrammarError::value(value, ValueRule::UnknownRestrictionValue))?;
        conditions.push(Condition {
            value: parsed,
            condition: condition.to_string(),
        });
    }
    Ok(ConditionSet(conditions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccessValue, RestrictionValue, TransportMode, Unit};
    use yare::parameterized;

    #[test]
    fn test_single_clause() {
        let set = parse_value(RestrictionType::Access, "no @ (Sa 08:00-16:00)").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.0[0].value, RestrictionValue::Access(AccessValue::No));
        assert_eq!(set.0[0].condition, "Sa 08:00-16:00");
    }

    #[test]
    fn test_two_clauses_keep_order() {
        let set = parse_value(
            RestrictionType::Access,
            "no @ (Mo-Fr 07:00-09:00);destination @ (Sa,Su)",
        )
        .unwrap();
        let values: Vec<_> = set.iter().map(|c| c.value).collect();
        assert_eq!(
            values,
            vec![
                RestrictionValue::Access(AccessValue::No),
                RestrictionValue::Access(AccessValue::Destination)
            ]
        );
        assert_eq!(set.0[1].condition, "Sa,Su");
    }

    #[test]
    fn test_space_after_semicolon_is_tolerated() {
        let set = parse_value(
            RestrictionType::Maxweight,
            "7.5 t @ (06:00-22:00); 3.5 t @ (22:00-06:00)",
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.0[1].value,
            RestrictionValue::Quantity {
                amount: 3.5,
                unit: Some(Unit::Tonnes)
            }
        );
    }

    #[test]
    fn test_semicolon_inside_condition_does_not_split() {
        let set = parse_value(
            RestrictionType::Transport(TransportMode::Hgv),
            "no @ (Mo-Fr 06:00-10:00; Sa 08:00-12:00)",
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.0[0].condition, "Mo-Fr 06:00-10:00; Sa 08:00-12:00");
    }

    #[test]
    fn test_nested_parentheses_in_condition() {
        let set = parse_value(
            RestrictionType::Access,
            "no @ ((Mo-Fr 07:00-09:00) AND wet)",
        )
        .unwrap();
        assert_eq!(set.0[0].condition, "(Mo-Fr 07:00-09:00) AND wet");
    }

    #[parameterized(
        no_spaces = { "no@(Sa 08:00-16:00)", ValueRule::MissingSeparator },
        space_before_only = { "no @(Sa 08:00-16:00)", ValueRule::MissingSeparator },
        space_after_only = { "no@ (Sa 08:00-16:00)", ValueRule::MissingSeparator },
        double_space_before = { "no  @ (Sa 08:00-16:00)", ValueRule::MalformedValueToken },
        double_space_after = { "no @  (Sa 08:00-16:00)", ValueRule::UnparenthesizedCondition },
        missing_value = { " @ (Sa 08:00-16:00)", ValueRule::MalformedValueToken },
        leading_space = { "  no @ (Sa)", ValueRule::MalformedValueToken },
        trailing_space = { "no @ (Sa)  ", ValueRule::UnparenthesizedCondition },
        space_before_semicolon = { "no @ (Sa) ;yes @ (Su)", ValueRule::UnparenthesizedCondition },
        blank_second_clause = { "no @ (Sa);  ", ValueRule::EmptyClause },
        no_parentheses = { "no @ Sa 08:00-16:00", ValueRule::UnparenthesizedCondition },
        trailing_text = { "no @ (Sa 08:00-16:00) wet", ValueRule::UnparenthesizedCondition },
        two_groups = { "no @ (Sa) (Su)", ValueRule::UnparenthesizedCondition },
        unclosed = { "no @ (Sa 08:00-16:00", ValueRule::UnbalancedParentheses },
        stray_close = { "no @ Sa)", ValueRule::UnbalancedParentheses },
        empty_condition = { "no @ ( )", ValueRule::EmptyCondition },
        empty_value = { "", ValueRule::EmptyClause },
        trailing_semicolon = { "no @ (Sa);", ValueRule::EmptyClause },
        double_semicolon = { "no @ (Sa);;yes @ (Su)", ValueRule::EmptyClause },
        unknown_value = { "notallowed @ (Sa 08:00-16:00)", ValueRule::UnknownRestrictionValue },
        bad_second_clause = { "no @ (Sa);yes@(Su)", ValueRule::MissingSeparator },
    )]
    fn test_invalid_values(value: &str, rule: ValueRule) {
        let err = parse_value(RestrictionType::Access, value).unwrap_err();
        assert_eq!(
            err,
            GrammarError::Value {
                value: value.to_string(),
                rule
            }
        );
    }

    #[parameterized(
        syntax = { "no@(Sa 08:00-16:00)" },
        vocabulary = { "notallowed @ (Sa 08:00-16:00)" },
    )]
    fn test_syntax_and_vocabulary_share_message(value: &str) {
        let err = parse_value(RestrictionType::Access, value).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "The conditional value {value} does not respect the format \"<restriction-value> @ <condition>[;<restriction-value> @ <condition>]\" "
            )
        );
    }

    #[test]
    fn test_vocabulary_follows_restriction_type() {
        assert!(parse_value(RestrictionType::Maxspeed, "30 mph @ (wet)").is_ok());
        assert!(parse_value(RestrictionType::Access, "30 mph @ (wet)").is_err());
    }

    #[test]
    fn test_split_clauses() {
        let clauses = split_clauses("a @ (x);  b @ (y; z)").unwrap();
        assert_eq!(clauses, vec!["a @ (x)", "b @ (y; z)"]);
    }
}
