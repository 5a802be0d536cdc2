//! Wound assessment checklist.

use serde::{Deserialize, Serialize};

/// Four yes/no observations recorded with every evolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoundAssessment {
    /// Odor present.
    #[serde(default)]
    pub odor: bool,
    /// Exudate present.
    #[serde(default)]
    pub exudate: bool,
    /// Irregular or compromised edges.
    #[serde(default)]
    pub edges: bool,
    /// Depth observed.
    #[serde(default)]
    pub depth: bool,
}

impl WoundAssessment {
    /// Labels of the findings that are present, in checklist order.
    pub fn findings(&self) -> Vec<&'static str> {
        [
            (self.odor, "odor"),
            (self.exudate, "exudate"),
            (self.edges, "edges"),
            (self.depth, "depth"),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect()
    }
}
