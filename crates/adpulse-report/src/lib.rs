//! Period-over-period reporting over ad insights.
//!
//! Turns two [`adpulse_meta::InsightsRecord`]s (current period, prior period)
//! into an ordered list of display-ready [`MetricRow`]s: labeled values with
//! formatted percentage deltas. The whole crate is pure and total; malformed
//! or missing vendor data degrades individual tiles, never the batch.

pub mod delta;
pub mod extract;
pub mod format;
pub mod rows;
pub mod types;

pub use delta::{coerce_metric, cost_per_click, percent_change, NO_DELTA};
pub use extract::{extract_action_map, ActionField};
pub use format::{format_count, format_currency};
pub use rows::build_metric_rows;
pub use types::MetricRow;
