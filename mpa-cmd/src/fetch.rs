//! Native fetch commands against the dashboard backend.

use anyhow::Context;
use log::info;
use mpa_api::client::ApiClient;
use mpa_api::query::SeriesKind;
use mpa_core::dates::{parse_day, DateSpan};
use mpa_core::region::{Region, RegionId};
use std::io::Write;

/// List every zone with timeseries data as CSV on stdout (metadata only,
/// geometry suppressed).
pub async fn run_regions(base_url: &str) -> anyhow::Result<()> {
    let client = ApiClient::new(base_url);
    let features = client.list_regions(false, &[]).await?;
    info!("{} zone(s) with timeseries data", features.len());

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["id", "name", "class", "km2", "depths"])?;
    for feature in features {
        let region: Region = feature.into();
        let depths = region
            .depths
            .iter()
            .map(|depth| depth.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writer.write_record([
            region.id.to_string(),
            region.name,
            region.classification,
            format!("{:.2}", region.km2),
            depths,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Fetch one zone's observed/climatology series and write it as CSV.
pub async fn run_timeseries(
    base_url: &str,
    mpa: RegionId,
    depth: Option<i32>,
    start_date: &str,
    end_date: &str,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let span = DateSpan::parse(start_date, end_date)?;
    let client = ApiClient::new(base_url);

    info!("querying zone {mpa} from {start_date} to {end_date}");
    let response = client
        .timeseries(mpa, depth, &span, SeriesKind::default())
        .await?;

    let sink: Box<dyn Write> = match out {
        Some(path) => Box::new(
            std::fs::File::create(path).with_context(|| format!("could not create {path}"))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(["date", "value", "climatology", "observation"])?;
    let rows = response.data.len();
    for point in &response.data {
        let Some(day) = point.day() else { continue };
        writer.write_record([
            day.to_string(),
            point.ts_data.to_string(),
            point.clim.to_string(),
            point
                .observation
                .map(|value| value.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    info!("wrote {rows} row(s)");
    Ok(())
}

/// Fetch the batched indicator payload for a set of zones on one date and
/// print a per-zone summary.
pub async fn run_indicators(base_url: &str, ids: &[RegionId], raw_date: &str) -> anyhow::Result<()> {
    let date = parse_day(raw_date)
        .ok_or_else(|| anyhow::anyhow!("invalid date: {raw_date} (expected YYYY-MM-DD)"))?;
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let client = ApiClient::new(base_url);
    let snapshots = client.network_indicators(&joined, date).await?;

    for &id in ids {
        match snapshots.get(&id) {
            Some(snapshot) => {
                println!(
                    "{id}: value {:.3} C, climatology {:.3} C, anomaly {:+.3}, {:?}",
                    snapshot.value,
                    snapshot.climatology,
                    snapshot.anomaly(),
                    snapshot.condition(),
                );
            }
            None => println!("{id}: no data for {raw_date}"),
        }
    }
    Ok(())
}
