//! Action-map extraction from raw insight records.

use std::collections::HashMap;

use adpulse_meta::{ActionStat, InsightsRecord};

/// The four list-valued insights fields an action map can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionField {
    Actions,
    CostPerActionType,
    Conversions,
    CostPerConversion,
}

/// Build an `action_type -> value` map from one list field of a record.
///
/// Entries without a `value` key are skipped (the vendor ships such entries
/// in `cost_per_conversion`; the skip applies uniformly). Values that fail to
/// parse, or parse non-finite, count as zero. A duplicate `action_type` keeps
/// the last entry. An absent field yields an empty map, never a failure.
#[must_use]
pub fn extract_action_map(record: &InsightsRecord, field: ActionField) -> HashMap<String, f64> {
    let stats: &[ActionStat] = match field {
        ActionField::Actions => &record.actions,
        ActionField::CostPerActionType => &record.cost_per_action_type,
        ActionField::Conversions => &record.conversions,
        ActionField::CostPerConversion => &record.cost_per_conversion,
    };

    let mut map = HashMap::with_capacity(stats.len());
    for stat in stats {
        let Some(raw) = stat.value.as_deref() else {
            continue;
        };
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        map.insert(stat.action_type.clone(), value);
    }
    map
}
