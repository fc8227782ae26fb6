use serde::Serialize;

/// One display-ready dashboard tile: label, formatted value, and the
/// period-over-period delta string.
///
/// Rows carry no identity beyond their position; the list is regenerated on
/// every render and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
    pub delta: String,
}
