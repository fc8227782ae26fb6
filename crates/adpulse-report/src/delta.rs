//! Period-over-period delta arithmetic.
//!
//! Every function here is total: vendor values arrive as strings or not at
//! all, and nothing in this module may panic or propagate an error into a
//! render. Unrepresentable deltas collapse to the [`NO_DELTA`] sentinel.

/// Sentinel shown when a delta cannot be computed.
pub const NO_DELTA: &str = "-";

/// Parse a raw metric value.
///
/// A missing value is literal zero (the vendor omits fields with no
/// delivery). A present but unparseable or non-finite value is `None`, which
/// downstream renders as [`NO_DELTA`].
#[must_use]
pub fn coerce_metric(raw: Option<&str>) -> Option<f64> {
    match raw {
        None => Some(0.0),
        Some(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Percentage change between two periods, formatted for a tile.
///
/// Total over every input combination:
/// - a failed coercion on either side yields `"-"`;
/// - a zero previous period yields `"+∞%"` (growth from nothing) when the
///   current value is positive, else `"0.0%"`;
/// - zero change renders unsigned as `"0.0%"`;
/// - anything else carries an explicit sign and one decimal place,
///   e.g. `"+20.0%"`, `"-5.3%"`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> String {
    let (Some(current), Some(previous)) = (current, previous) else {
        return NO_DELTA.to_string();
    };

    if previous == 0.0 {
        return if current > 0.0 {
            "+∞%".to_string()
        } else {
            "0.0%".to_string()
        };
    }

    let change = (current - previous) / previous * 100.0;
    if change == 0.0 {
        return "0.0%".to_string();
    }
    if !change.is_finite() {
        // Overflow from a denormal previous value; keep the sign honest.
        return if change > 0.0 { "+∞%" } else { "-∞%" }.to_string();
    }
    format!("{change:+.1}%")
}

/// Spend divided by link clicks for the period.
///
/// A non-positive click count yields `0.0` rather than a division blow-up.
#[must_use]
pub fn cost_per_click(spend: f64, link_clicks: f64) -> f64 {
    if link_clicks > 0.0 {
        spend / link_clicks
    } else {
        0.0
    }
}
