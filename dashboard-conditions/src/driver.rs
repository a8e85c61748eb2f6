//! Fetch drivers: the queue-deadline sleeper and the primary-region series
//! fetch.
//!
//! Each write to a fetch queue re-arms the driver with the queue's current
//! deadline. A task that wakes before the (since slid) deadline polls,
//! gets nothing and dies; the task armed by the last enqueue is the one
//! that issues the batch. Batches complete strictly in sequence: the
//! follow-up batch returned by `complete` is issued immediately.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use mpa_api::client::ApiClient;
use mpa_api::query::SeriesKind;
use mpa_chart_ui::map_bridge;
use mpa_chart_ui::state::{now_ms, AppState};
use mpa_chart_ui::tooltip::region_tooltip_html;
use mpa_core::batcher::{Batch, FetchBatcher};
use mpa_core::dates::DateSpan;
use mpa_core::region::RegionId;
use mpa_core::selection::QuantileBand;

/// Backend base URL: the page's own origin.
pub fn base_url() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string())
}

/// Arm a sleeper for the queue's current deadline. Call from an effect that
/// reads the queue signal, so every enqueue re-arms with the slid deadline.
pub fn arm_queue_driver(state: AppState, queue: Signal<FetchBatcher>) {
    let Some(delay) = queue.read().time_until_due(now_ms()) else {
        return;
    };
    spawn(async move {
        TimeoutFuture::new(delay as u32).await;
        let mut queue = queue;
        let due = queue.write().poll(now_ms());
        if let Some(batch) = due {
            run_batches(state, queue, batch).await;
        }
    });
}

/// Issue a batch and every follow-up batch that accumulated while it was in
/// flight, merging each successful response into the region store.
async fn run_batches(mut state: AppState, mut queue: Signal<FetchBatcher>, first: Batch) {
    let client = ApiClient::new(base_url());
    let mut current = Some(first);

    while let Some(batch) = current.take() {
        let date = state.selection.read().selected_date();
        let Some(date) = date else {
            // Nothing to ask for without a selected date; release the queue.
            current = queue.write().complete(&batch);
            continue;
        };

        match client.network_indicators(&batch.join_ids(), date).await {
            Ok(snapshots) => {
                if queue.read().is_current(&batch) {
                    state.store.write().merge_indicators(&snapshots);
                    refresh_tooltips(&state);
                } else {
                    debug!("discarding stale indicator batch {}", batch.generation());
                }
            }
            Err(err) => {
                // No retry: the affected regions keep their previous data
                // until the next triggering interaction.
                warn!("indicator batch {} failed: {err}", batch.generation());
            }
        }
        current = queue.write().complete(&batch);
    }
}

/// Rebind hover tooltips for every region that has indicator data.
fn refresh_tooltips(state: &AppState) {
    let Some(date) = state.selection.read().selected_date() else {
        return;
    };
    let store = state.store.read();
    for region in store.iter() {
        if region.indicator.is_some() {
            map_bridge::set_tooltip(region.id, &region_tooltip_html(region, date));
        }
    }
}

/// Fetch the primary region's time-series, quantile and anomaly data.
///
/// Each call supersedes earlier ones via the sequence signal: when two
/// fetches race, only the latest one's responses are applied, regardless of
/// arrival order.
pub fn fetch_primary_series(
    mut state: AppState,
    mut sequence: Signal<u64>,
    region: RegionId,
    span: DateSpan,
    depth: Option<i32>,
    band: QuantileBand,
) {
    let token = {
        let mut sequence = sequence.write();
        *sequence += 1;
        *sequence
    };

    spawn(async move {
        let client = ApiClient::new(base_url());
        state.loading.set(true);
        let timeseries = client
            .timeseries(region, depth, &span, SeriesKind::default())
            .await;
        let quantiles = client.quantiles(region, depth, &span, band).await;
        let anomalies = client.anomalies(region, depth, &span).await;
        state.loading.set(false);

        if *sequence.peek() != token {
            debug!("discarding superseded series fetch {token}");
            return;
        }

        match timeseries {
            Ok(response) => {
                state.error_msg.set(None);
                state.timeseries.set(Some(response));
            }
            Err(err) => {
                warn!("timeseries fetch failed: {err}");
                state
                    .error_msg
                    .set(Some("No timeseries data available for the selected zone.".to_string()));
            }
        }
        match quantiles {
            Ok(response) => state.quantiles.set(Some(response)),
            Err(err) => warn!("quantile fetch failed: {err}"),
        }
        match anomalies {
            Ok(response) => state.anomalies.set(Some(response)),
            Err(err) => warn!("anomaly fetch failed: {err}"),
        }
    });
}
