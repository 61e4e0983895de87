use std::cmp::Ordering;

use crate::domain::entities::columns::FilterKind;
use crate::domain::entities::record::{parse_numeric_value, ComponentRecord};

/// Optional comparison prefix of a column filter (`>= 100`, `<2024-02`).
fn split_operator(text: &str) -> (Option<&'static str>, &str) {
    for op in [">=", "<=", ">", "<", "="] {
        if let Some(rest) = text.strip_prefix(op) {
            return (Some(op), rest.trim());
        }
    }
    (None, text)
}

fn ordering_satisfies(op: &str, ordering: Ordering) -> bool {
    match op {
        ">=" => ordering.is_ge(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        "<" => ordering.is_lt(),
        _ => ordering.is_eq(),
    }
}

/// Per-column filter. Text columns match case-insensitive substrings; number
/// columns compare numerically (bare value means equality); date columns
/// compare ISO dates as text, a bare value matching as a prefix (`2024-03`).
/// A number filter that does not parse keeps every row.
pub fn column_filter_matches(
    kind: FilterKind,
    record: &ComponentRecord,
    field: &str,
    text: &str,
) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }
    match kind {
        FilterKind::Text => record
            .display(field)
            .to_lowercase()
            .contains(&text.to_lowercase()),
        FilterKind::Number => {
            let (op, operand) = split_operator(text);
            let Some(target) = parse_numeric_value(operand) else {
                return true;
            };
            record
                .number(field)
                .and_then(|value| value.partial_cmp(&target))
                .is_some_and(|ordering| ordering_satisfies(op.unwrap_or("="), ordering))
        }
        FilterKind::Date => {
            let value = record.display(field);
            if value.is_empty() {
                return false;
            }
            match split_operator(text) {
                (None, operand) => value.starts_with(operand),
                (Some(op), operand) => ordering_satisfies(op, value.as_str().cmp(operand)),
            }
        }
    }
}

/// Ascending order of two records on `field`. Number columns compare
/// numerically with blanks last; everything else compares case-insensitively.
pub fn compare_records(
    kind: FilterKind,
    a: &ComponentRecord,
    b: &ComponentRecord,
    field: &str,
) -> Ordering {
    match kind {
        FilterKind::Number => match (a.number(field), b.number(field)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        FilterKind::Text | FilterKind::Date => a
            .display(field)
            .to_lowercase()
            .cmp(&b.display(field).to_lowercase()),
    }
}
