mod report;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "adpulse-cli")]
#[command(about = "Ads performance dashboard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch insights for a date range and print the metric tiles.
    Report(ReportArgs),
    /// Print the named range presets resolved against today.
    Presets,
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Named range: last_7d, last_14d, or last_30d.
    #[arg(long, conflicts_with_all = ["since", "until"])]
    preset: Option<String>,

    /// Custom range start (YYYY-MM-DD); requires --until.
    #[arg(long, requires = "until")]
    since: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD); requires --since.
    #[arg(long, requires = "since")]
    until: Option<NaiveDate>,

    /// Emit the rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => report::run(&args).await,
        Commands::Presets => {
            report::print_presets(chrono::Utc::now().date_naive());
            Ok(())
        }
    }
}
