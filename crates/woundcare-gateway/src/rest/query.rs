//! Rendering of [`Query`] values into the REST query language.
//!
//! `?select=*&patient_id=eq.<id>&order=photo_date.desc&limit=10`

use woundcare_core::types::{FilterField, Query};

/// Query-string pairs for a `SELECT`.
pub fn select_pairs(query: &Query) -> Vec<(String, String)> {
    let mut pairs = vec![("select".to_string(), "*".to_string())];
    pairs.extend(filter_pairs(&query.filters));

    if !query.order.is_empty() {
        let order: Vec<String> = query
            .order
            .iter()
            .map(|s| format!("{}.{}", s.field, s.direction.as_str()))
            .collect();
        pairs.push(("order".to_string(), order.join(",")));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    pairs
}

/// Query-string pairs selecting the rows an update or delete targets.
pub fn filter_pairs(filters: &[FilterField]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| {
            (
                f.field.clone(),
                format!("{}.{}", f.op.as_str(), f.value.render()),
            )
        })
        .collect()
}
