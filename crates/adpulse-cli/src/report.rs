//! The `report` command: fetch both periods and render the tiles.

use adpulse_core::{DateRange, Preset};
use adpulse_meta::{MetaClient, MetaClientConfig};
use adpulse_report::{build_metric_rows, MetricRow};
use chrono::NaiveDate;

use crate::ReportArgs;

pub(crate) async fn run(args: &ReportArgs) -> anyhow::Result<()> {
    let config = adpulse_core::load_app_config()?;
    let catalog = adpulse_core::load_catalog(&config.metrics_path)?;
    let client_config = MetaClientConfig::from_app_config(&config);
    let client = MetaClient::with_base_url(&client_config, &config.meta_base_url)?;

    let today = chrono::Utc::now().date_naive();
    let range = resolve_range(args, today)?;
    let previous_range = range.previous();

    tracing::debug!(
        since = %range.since,
        until = %range.until,
        "fetching insights for range and previous period"
    );
    let (current, previous) = tokio::try_join!(
        client.insights(&range),
        client.insights(&previous_range),
    )?;

    let Some(record) = current else {
        println!(
            "No ads data available for {} to {}.",
            range.since, range.until
        );
        return Ok(());
    };

    let rows = build_metric_rows(&catalog, &record, &previous.unwrap_or_default());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_table(&range, &previous_range, &rows));
    }
    Ok(())
}

pub(crate) fn print_presets(today: NaiveDate) {
    for preset in Preset::ALL {
        let range = preset.resolve(today);
        println!(
            "{:<10} {:<14} {} to {}",
            preset.id(),
            preset.label(),
            range.since,
            range.until
        );
    }
}

fn resolve_range(args: &ReportArgs, today: NaiveDate) -> anyhow::Result<DateRange> {
    if let Some(id) = args.preset.as_deref() {
        return Preset::from_id(id)
            .map(|preset| preset.resolve(today))
            .ok_or_else(|| {
                anyhow::anyhow!("unknown preset '{id}'; expected last_7d, last_14d, or last_30d")
            });
    }
    match (args.since, args.until) {
        (Some(since), Some(until)) => Ok(DateRange::new(since, until)?),
        // clap enforces since/until pairing, so anything else means defaults.
        _ => Ok(Preset::Last7Days.resolve(today)),
    }
}

fn render_table(range: &DateRange, previous: &DateRange, rows: &[MetricRow]) -> String {
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|r| r.value.len()).max().unwrap_or(0);

    let mut out = format!(
        "Meta performance {} to {} (vs {} to {})\n\n",
        range.since, range.until, previous.since, previous.until
    );
    for row in rows {
        out.push_str(&format!(
            "{:<label_width$}  {:>value_width$}  {}\n",
            row.label, row.value, row.delta
        ));
    }
    out
}
