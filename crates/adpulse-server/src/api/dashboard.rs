use adpulse_core::{DateRange, Preset};
use adpulse_report::{build_metric_rows, MetricRow};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_meta_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SummaryQuery {
    pub preset: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(super) struct DashboardSummary {
    range: DateRange,
    previous_range: DateRange,
    /// False when the vendor reported no delivery for the current period;
    /// the UI renders a "no data available" notice instead of tiles.
    has_data: bool,
    metrics: Vec<MetricRow>,
}

#[derive(Debug, Serialize)]
pub(super) struct PresetItem {
    id: &'static str,
    label: &'static str,
    range: DateRange,
}

/// Resolve the requested reporting range.
///
/// A named preset wins; explicit `since`/`until` form a custom range; with
/// neither, the dashboard's default view (last 7 days) applies.
fn resolve_range(query: &SummaryQuery, today: NaiveDate) -> Result<DateRange, String> {
    if let Some(id) = query.preset.as_deref() {
        return Preset::from_id(id)
            .map(|preset| preset.resolve(today))
            .ok_or_else(|| {
                format!("unknown preset '{id}'; expected last_7d, last_14d, or last_30d")
            });
    }

    match (query.since, query.until) {
        (Some(since), Some(until)) => DateRange::new(since, until).map_err(|e| e.to_string()),
        (None, None) => Ok(Preset::Last7Days.resolve(today)),
        _ => Err("custom ranges need both since and until".to_string()),
    }
}

pub(super) async fn dashboard_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let today = chrono::Utc::now().date_naive();
    let range = resolve_range(&query, today)
        .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?;
    let previous_range = range.previous();

    let (current, previous) = tokio::try_join!(
        state.insights.insights(&range),
        state.insights.insights(&previous_range),
    )
    .map_err(|e| map_meta_error(req_id.0.clone(), &e))?;

    let has_data = current.is_some();
    let metrics = current
        .map(|record| {
            build_metric_rows(&state.catalog, &record, &previous.unwrap_or_default())
        })
        .unwrap_or_default();

    Ok(Json(ApiResponse {
        data: DashboardSummary {
            range,
            previous_range,
            has_data,
            metrics,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_presets(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<PresetItem>>> {
    let today = chrono::Utc::now().date_naive();
    let data = Preset::ALL
        .into_iter()
        .map(|preset| PresetItem {
            id: preset.id(),
            label: preset.label(),
            range: preset.resolve(today),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
