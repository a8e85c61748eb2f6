//! HTTP client for the backend endpoints.
//!
//! A thin wrapper over `reqwest` that builds URLs, attaches query
//! parameters and decodes JSON. Failures are logged and surfaced as error
//! results; there are no automatic retries; a failed batch simply leaves
//! the affected regions without updated data until the next interaction.

use crate::dto::{
    indicator_snapshots, AnomalyResponse, IndicatorMap, MaxDateResponse, Paginated,
    QuantileResponse, RegionFeature, Species, TimeseriesResponse,
};
use crate::query::{self, Params, SeriesKind, REGION_PAGE_SIZE};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use log::{debug, warn};
use mpa_core::dates::DateSpan;
use mpa_core::region::{IndicatorSnapshot, RegionId};
use mpa_core::selection::QuantileBand;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

const REGIONS_PATH: &str = "api/v1/mpas-with-timeseries/";
const NETWORK_INDICATOR_PATH: &str = "api/v1/network-indicator/";
const TIMESERIES_PATH: &str = "api/v1/timeseries-data/";
const QUANTILE_PATH: &str = "api/v1/quantile-data/";
const ANOMALY_PATH: &str = "api/v1/standard-anomalies/";
const SPECIES_PATH: &str = "api/v1/species/";
const MAX_DATE_PATH: &str = "api/v1/max-date/";

/// Client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ApiClient {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        ApiClient {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &Params) -> anyhow::Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        let status = response.status();
        if !status.is_success() {
            warn!("bad response status for {path}: {status}");
            bail!("{path} returned {status}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("could not decode {path} response"))
    }

    /// List every MPA zone that has time-series data, walking the paginated
    /// endpoint.
    ///
    /// A `geometry=false` probe with page size 1 fetches the count first, so
    /// heavy polygon payloads are only pulled for the pages that exist.
    /// `filter` restricts the listing to specific zone ids.
    pub async fn list_regions(
        &self,
        with_geometry: bool,
        filter: &[RegionId],
    ) -> anyhow::Result<Vec<RegionFeature>> {
        let probe: Paginated<RegionFeature> = self
            .get_json(REGIONS_PATH, &query::region_page(1, 1, false, filter))
            .await?;
        if probe.count == 0 {
            return Ok(Vec::new());
        }

        let total_pages = probe.count.div_ceil(REGION_PAGE_SIZE);
        let mut features = Vec::with_capacity(probe.count as usize);
        for page in 1..=total_pages {
            let params = query::region_page(page, REGION_PAGE_SIZE, with_geometry, filter);
            let listing: Paginated<RegionFeature> = self.get_json(REGIONS_PATH, &params).await?;
            features.extend(listing.results);
        }
        debug!("loaded {} region(s)", features.len());
        Ok(features)
    }

    /// Fetch indicator payloads for a whole batch of regions in one round
    /// trip. The result is keyed by region id; regions the backend has no
    /// data for are simply absent.
    pub async fn network_indicators(
        &self,
        joined_ids: &str,
        date: NaiveDate,
    ) -> anyhow::Result<BTreeMap<RegionId, IndicatorSnapshot>> {
        let params = query::network_indicators(joined_ids, date);
        let map: IndicatorMap = self.get_json(NETWORK_INDICATOR_PATH, &params).await?;
        Ok(indicator_snapshots(&map))
    }

    /// Fetch the observed/climatology time series for one region.
    pub async fn timeseries(
        &self,
        mpa: RegionId,
        depth: Option<i32>,
        span: &DateSpan,
        kind: SeriesKind,
    ) -> anyhow::Result<TimeseriesResponse> {
        let params = query::timeseries(mpa, depth, span, kind);
        self.get_json(TIMESERIES_PATH, &params).await
    }

    /// Fetch the quantile-threshold series for one region.
    pub async fn quantiles(
        &self,
        mpa: RegionId,
        depth: Option<i32>,
        span: &DateSpan,
        band: QuantileBand,
    ) -> anyhow::Result<QuantileResponse> {
        let params = query::quantiles(mpa, depth, span, band);
        self.get_json(QUANTILE_PATH, &params).await
    }

    /// Fetch the yearly standardized-anomaly series for one region.
    pub async fn anomalies(
        &self,
        mpa: RegionId,
        depth: Option<i32>,
        span: &DateSpan,
    ) -> anyhow::Result<AnomalyResponse> {
        let params = query::anomalies(mpa, depth, span);
        self.get_json(ANOMALY_PATH, &params).await
    }

    /// List all species with thermal-range data.
    pub async fn species(&self) -> anyhow::Result<Vec<Species>> {
        self.get_json(SPECIES_PATH, &Params::new()).await
    }

    /// Latest date with data, used to seed the dashboard's date controls.
    pub async fn max_date(&self) -> anyhow::Result<Option<NaiveDate>> {
        let response: MaxDateResponse = self.get_json(MAX_DATE_PATH, &Params::new()).await?;
        Ok(response.day())
    }
}
