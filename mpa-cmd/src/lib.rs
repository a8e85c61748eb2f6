//! Command implementations for the MPA dashboard CLI.
//!
//! Provides subcommands for querying the dashboard backend natively:
//! zone listings, timeseries CSV export and batched indicator lookups.

use clap::Subcommand;

pub mod fetch;

#[derive(Subcommand)]
pub enum Command {
    /// List MPA zones that have timeseries data
    Regions {
        /// Backend base URL
        #[arg(short, long)]
        base_url: String,
    },

    /// Fetch a zone's timeseries and write it as CSV
    Timeseries {
        /// Backend base URL
        #[arg(short, long)]
        base_url: String,

        /// MPA zone id
        #[arg(short, long)]
        mpa: i64,

        /// Depth level in metres (omit for the whole-column series)
        #[arg(short, long)]
        depth: Option<i32>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,

        /// Output CSV path (stdout when omitted)
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Fetch the batched indicator payload for one or more zones on a date
    Indicators {
        /// Backend base URL
        #[arg(short, long)]
        base_url: String,

        /// Zone ids (repeatable)
        #[arg(short, long, required = true)]
        id: Vec<i64>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Regions { base_url } => fetch::run_regions(&base_url).await,
        Command::Timeseries {
            base_url,
            mpa,
            depth,
            start_date,
            end_date,
            out,
        } => fetch::run_timeseries(&base_url, mpa, depth, &start_date, &end_date, out.as_deref()).await,
        Command::Indicators { base_url, id, date } => {
            fetch::run_indicators(&base_url, &id, &date).await
        }
    }
}
