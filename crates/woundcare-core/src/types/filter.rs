//! Filter types for row queries.
//!
//! Filters are rendered into the REST query language by the remote gateway
//! and evaluated directly against JSON rows by the in-memory gateway.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Neq,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Case-insensitive pattern match, `*` or `%` as wildcard.
    ILike,
    /// List membership.
    In,
    /// `IS NULL` check.
    IsNull,
}

impl FilterOp {
    /// Operator keyword in the REST query language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::ILike => "ilike",
            Self::In => "in",
            Self::IsNull => "is",
        }
    }
}

/// A filter operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values (for `In`).
    StringList(Vec<String>),
    /// No value (for `IsNull`).
    Null,
}

impl FilterValue {
    /// Render the operand as it appears after `op.` in a query string.
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::StringList(items) => {
                let quoted: Vec<String> = items.iter().map(|s| format!("\"{s}\"")).collect();
                format!("({})", quoted.join(","))
            }
            Self::Null => "null".to_string(),
        }
    }
}

/// A single filter condition on a named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Equality filter; accepts anything displayable (ids, dates, text).
    pub fn eq(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, FilterOp::Eq, FilterValue::String(value.to_string()))
    }

    /// Lower bound filter (inclusive).
    pub fn gte(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, FilterOp::Gte, FilterValue::String(value.to_string()))
    }

    /// Upper bound filter (inclusive).
    pub fn lte(field: impl Into<String>, value: impl ToString) -> Self {
        Self::new(field, FilterOp::Lte, FilterValue::String(value.to_string()))
    }

    /// Case-insensitive pattern filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// List membership filter.
    pub fn is_in(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOp::In, FilterValue::StringList(values))
    }

    /// Evaluate this filter against a JSON row.
    pub fn matches(&self, row: &Value) -> bool {
        let actual = row.get(&self.field).unwrap_or(&Value::Null);
        match self.op {
            FilterOp::IsNull => actual.is_null(),
            FilterOp::Eq => compare(actual, &self.value) == Some(Ordering::Equal),
            FilterOp::Neq => compare(actual, &self.value) != Some(Ordering::Equal),
            FilterOp::Gte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lte => matches!(
                compare(actual, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::ILike => match (actual, &self.value) {
                (Value::String(text), FilterValue::String(pattern)) => {
                    wildcard_match(&text.to_lowercase(), &pattern.to_lowercase())
                }
                _ => false,
            },
            FilterOp::In => match &self.value {
                FilterValue::StringList(items) => {
                    let text = scalar_text(actual);
                    text.is_some_and(|t| items.iter().any(|i| *i == t))
                }
                _ => false,
            },
        }
    }
}

/// Textual form of a scalar JSON value.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn compare(actual: &Value, expected: &FilterValue) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Null, FilterValue::Null) => Some(Ordering::Equal),
        (Value::Bool(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        (Value::Number(a), FilterValue::Integer(b)) => a.as_f64()?.partial_cmp(&(*b as f64)),
        (Value::Number(a), FilterValue::String(b)) => {
            a.as_f64()?.partial_cmp(&b.parse::<f64>().ok()?)
        }
        (Value::Bool(a), FilterValue::String(b)) => Some(a.to_string().as_str().cmp(b.as_str())),
        (Value::String(a), FilterValue::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::String(a), FilterValue::Integer(b)) => Some(a.as_str().cmp(b.to_string().as_str())),
        _ => None,
    }
}

/// Glob match where `*` and `%` match any run of characters.
fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (mut t, mut p) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut mark = 0usize;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '*' || pattern[p] == '%') {
            star = Some(p);
            mark = t;
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            t += 1;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            mark += 1;
            t = mark;
        } else {
            return false;
        }
    }
    while p < pattern.len() && (pattern[p] == '*' || pattern[p] == '%') {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_matches_string_column() {
        let row = json!({ "id": "a1", "patient_id": "p1" });
        assert!(FilterField::eq("patient_id", "p1").matches(&row));
        assert!(!FilterField::eq("patient_id", "p2").matches(&row));
    }

    #[test]
    fn test_date_bounds_compare_lexically() {
        let row = json!({ "evolution_date": "2024-05-10" });
        assert!(FilterField::gte("evolution_date", "2024-05-03").matches(&row));
        assert!(FilterField::lte("evolution_date", "2024-05-10").matches(&row));
        assert!(!FilterField::gte("evolution_date", "2024-05-11").matches(&row));
    }

    #[test]
    fn test_ilike_wildcards() {
        let row = json!({ "full_name": "Maria Santos" });
        assert!(FilterField::ilike("full_name", "*santos*").matches(&row));
        assert!(FilterField::ilike("full_name", "maria%").matches(&row));
        assert!(!FilterField::ilike("full_name", "*silva*").matches(&row));
    }

    #[test]
    fn test_missing_column_is_null() {
        let row = json!({ "name": "Gaze" });
        let filter = FilterField::new("batch", FilterOp::IsNull, FilterValue::Null);
        assert!(filter.matches(&row));
    }

    #[test]
    fn test_in_list() {
        let row = json!({ "id": "b" });
        assert!(FilterField::is_in("id", vec!["a".into(), "b".into()]).matches(&row));
        assert_eq!(
            FilterValue::StringList(vec!["a".into(), "b".into()]).render(),
            "(\"a\",\"b\")"
        );
    }
}
