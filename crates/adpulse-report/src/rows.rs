//! Assembles the ordered dashboard tile list from a period pair.

use std::collections::HashMap;

use adpulse_core::MetricCatalog;
use adpulse_meta::InsightsRecord;

use crate::delta::{coerce_metric, cost_per_click, percent_change};
use crate::extract::{extract_action_map, ActionField};
use crate::format::{format_count, format_currency};
use crate::types::MetricRow;

/// Build the ordered tile rows for one current/previous period pair.
///
/// Tile order follows the catalog: total spend, tracked action counts,
/// tracked conversion counts, cost-per-click, then the cost-per-unit tiles
/// for every tracked metric carrying a `cost_label`. The function is total:
/// absent or malformed vendor data degrades the affected tile to zero or the
/// `"-"` delta, never an error for the batch.
#[must_use]
pub fn build_metric_rows(
    catalog: &MetricCatalog,
    current: &InsightsRecord,
    previous: &InsightsRecord,
) -> Vec<MetricRow> {
    let cur_actions = extract_action_map(current, ActionField::Actions);
    let prev_actions = extract_action_map(previous, ActionField::Actions);
    let cur_conversions = extract_action_map(current, ActionField::Conversions);
    let prev_conversions = extract_action_map(previous, ActionField::Conversions);
    let cur_action_costs = extract_action_map(current, ActionField::CostPerActionType);
    let prev_action_costs = extract_action_map(previous, ActionField::CostPerActionType);
    let cur_conversion_costs = extract_action_map(current, ActionField::CostPerConversion);
    let prev_conversion_costs = extract_action_map(previous, ActionField::CostPerConversion);

    let cur_spend = coerce_metric(current.spend.as_deref());
    let prev_spend = coerce_metric(previous.spend.as_deref());

    let mut rows = Vec::new();

    rows.push(MetricRow {
        label: catalog.spend_label.clone(),
        value: format_currency(cur_spend.unwrap_or(0.0)),
        delta: percent_change(cur_spend, prev_spend),
    });

    for metric in &catalog.actions {
        rows.push(count_row(
            &metric.label,
            &metric.key,
            &cur_actions,
            &prev_actions,
        ));
    }
    for metric in &catalog.conversions {
        rows.push(count_row(
            &metric.label,
            &metric.key,
            &cur_conversions,
            &prev_conversions,
        ));
    }

    let link_clicks = lookup(&cur_actions, &catalog.link_click_action);
    let prev_link_clicks = lookup(&prev_actions, &catalog.link_click_action);
    let cpc = cost_per_click(cur_spend.unwrap_or(0.0), link_clicks);
    let prev_cpc = cost_per_click(prev_spend.unwrap_or(0.0), prev_link_clicks);
    rows.push(MetricRow {
        label: catalog.cpc_label.clone(),
        value: format_currency(cpc),
        delta: percent_change(Some(cpc), Some(prev_cpc)),
    });

    for metric in &catalog.actions {
        if let Some(cost_label) = &metric.cost_label {
            rows.push(cost_row(
                cost_label,
                &metric.key,
                &cur_action_costs,
                &prev_action_costs,
            ));
        }
    }
    for metric in &catalog.conversions {
        if let Some(cost_label) = &metric.cost_label {
            rows.push(cost_row(
                cost_label,
                &metric.key,
                &cur_conversion_costs,
                &prev_conversion_costs,
            ));
        }
    }

    rows
}

fn lookup(map: &HashMap<String, f64>, key: &str) -> f64 {
    map.get(key).copied().unwrap_or(0.0)
}

fn count_row(
    label: &str,
    key: &str,
    current: &HashMap<String, f64>,
    previous: &HashMap<String, f64>,
) -> MetricRow {
    let cur = lookup(current, key);
    let prev = lookup(previous, key);
    MetricRow {
        label: label.to_string(),
        value: format_count(cur),
        delta: percent_change(Some(cur), Some(prev)),
    }
}

fn cost_row(
    label: &str,
    key: &str,
    current: &HashMap<String, f64>,
    previous: &HashMap<String, f64>,
) -> MetricRow {
    let cur = lookup(current, key);
    let prev = lookup(previous, key);
    MetricRow {
        label: label.to_string(),
        value: format_currency(cur),
        delta: percent_change(Some(cur), Some(prev)),
    }
}
