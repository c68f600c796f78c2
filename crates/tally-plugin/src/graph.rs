//! Graph definition types for the agent's schema output

use serde::{Deserialize, Serialize};

/// How the agent should render one graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Display label
    pub label: String,

    /// Unit ("integer", "float", "percentage", ...)
    pub unit: String,

    /// Metrics plotted on this graph
    pub metrics: Vec<MetricDef>,
}

/// One metric within a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDef {
    /// Metric name, appended to the key prefix on output
    pub name: String,

    /// Display label
    pub label: String,

    /// Whether the agent stacks this series
    #[serde(default)]
    pub stacked: bool,
}

/// Uppercase the first character, the way graph titles are labeled
pub(crate) fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
