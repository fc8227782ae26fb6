//! Meta Marketing API response types.
//!
//! All types model the JSON the Graph API insights endpoint actually returns:
//! every numeric value arrives as a decimal string, list fields are omitted
//! entirely when the account has no matching events, and some
//! `cost_per_conversion` entries carry no `value` key at all. Everything is
//! therefore `#[serde(default)]`-tolerant; [`InsightsRecord::default`] doubles
//! as the "no data for this range" record.

use serde::Deserialize;

/// One `{action_type, value}` stat entry from a list-valued insights field.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionStat {
    pub action_type: String,
    /// Numeric value as a decimal string. The API omits it for some
    /// `cost_per_conversion` entries; consumers skip those.
    #[serde(default)]
    pub value: Option<String>,
}

/// Account-level insights for one time range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsRecord {
    /// Total spend in account currency units, no symbol (e.g. `"1543.21"`).
    #[serde(default)]
    pub spend: Option<String>,
    /// The vendor's blended cost-per-click across all click types. Carried
    /// for completeness; the dashboard derives its link-click CPC from spend.
    #[serde(default)]
    pub cpc: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionStat>,
    #[serde(default)]
    pub cost_per_action_type: Vec<ActionStat>,
    #[serde(default)]
    pub conversions: Vec<ActionStat>,
    #[serde(default)]
    pub cost_per_conversion: Vec<ActionStat>,
    #[serde(default)]
    pub date_start: Option<String>,
    #[serde(default)]
    pub date_stop: Option<String>,
}

/// Envelope for insights responses: `{"data": [...], "paging": {...}}`.
///
/// At `level=account` with a single time range the `data` array holds at most
/// one record; an empty array means no delivery in the range.
#[derive(Debug, Deserialize)]
pub(crate) struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightsRecord>,
}

/// Graph API error envelope: `{"error": {"message", "code", ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}
