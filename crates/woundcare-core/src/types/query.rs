//! Row query description shared by every gateway implementation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::filter::FilterField;
use super::sorting::{SortDirection, SortField};

/// A `SELECT *` style query: conjunctive filters, ordering, optional limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// All filters must match.
    pub filters: Vec<FilterField>,
    /// Applied in order; earlier fields take precedence.
    pub order: Vec<SortField>,
    /// Maximum number of rows to return.
    pub limit: Option<u64>,
}

impl Query {
    /// An unfiltered, unordered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter.
    pub fn filter(mut self, filter: FilterField) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an ordering column.
    pub fn order(mut self, sort: SortField) -> Self {
        self.order.push(sort);
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a JSON row satisfies every filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Filter, sort and truncate a set of rows in place.
    ///
    /// Sorting is stable, so rows that tie keep their original order.
    pub fn apply(&self, rows: &mut Vec<Value>) {
        rows.retain(|row| self.matches(row));
        rows.sort_by(|a, b| {
            for sort in &self.order {
                let ordering = compare_column(a.get(&sort.field), b.get(&sort.field));
                let ordering = match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != std::cmp::Ordering::Equal {
                    return ordering;
                }
            }
            std::cmp::Ordering::Equal
        });
        if let Some(limit) = self.limit {
            rows.truncate(limit as usize);
        }
    }
}

/// Null sorts first ascending (and therefore last descending).
fn compare_column(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
