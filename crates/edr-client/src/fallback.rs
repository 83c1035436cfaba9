//! Explicit fallback to synthetic data, and concurrent multi-location fetch.
//!
//! Call sites opt in to degradation through [`with_fallback`]; the fetch and
//! decode layers never substitute data on their own. Whatever reaches the
//! user must carry its [`DataOrigin`] so synthetic data is always presented
//! as demo data, never as live.

use std::future::Future;

use futures::future::try_join_all;
use tracing::warn;

use coverage_decode::{synthesize_series, SeriesShape, TimeSeriesPoint};
use edr_protocol::{Geometry, GeometryError, QueryOptions};

use crate::client::{ClientError, EdrClient};

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Decoded from a live upstream response.
    Live,
    /// Produced by the synthesizer after a failure.
    Synthetic,
}

/// A dataset together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The dataset itself; same shape either way.
    pub data: T,

    /// Live or synthetic.
    pub origin: DataOrigin,
}

impl<T> Fetched<T> {
    /// Whether callers must surface a demo-data notice.
    pub fn is_synthetic(&self) -> bool {
        self.origin == DataOrigin::Synthetic
    }
}

/// Run `operation`; on failure, log it and substitute `synthesize()`.
///
/// The synthesized value is marked [`DataOrigin::Synthetic`] so the notice
/// to the user cannot be skipped by accident.
pub async fn with_fallback<T, E, Fut, F>(operation: Fut, synthesize: F) -> Fetched<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    F: FnOnce() -> T,
{
    match operation.await {
        Ok(data) => Fetched {
            data,
            origin: DataOrigin::Live,
        },
        Err(error) => {
            warn!(%error, "operation failed; substituting synthetic data");
            Fetched {
                data: synthesize(),
                origin: DataOrigin::Synthetic,
            }
        }
    }
}

/// A named point location for batch fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Display name, used to key the batch result.
    pub name: String,

    /// Longitude in degrees east.
    pub lon: f64,

    /// Latitude in degrees north.
    pub lat: f64,
}

impl Location {
    /// Build a location.
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
        }
    }

    fn geometry(&self) -> Result<Geometry, GeometryError> {
        Geometry::point(self.lon, self.lat)
    }
}

impl EdrClient {
    /// Fetch and decode series for several locations concurrently.
    ///
    /// All requests run in parallel and the result keeps the input order,
    /// keyed by location name. Any failing branch fails the whole batch;
    /// per-branch recovery is intentionally not offered, matching the
    /// all-or-nothing fallback the views apply per batch.
    pub async fn position_series_batch<S: AsRef<str>>(
        &self,
        collection_id: &str,
        locations: &[Location],
        options: &QueryOptions,
        parameter_names: &[S],
    ) -> Result<Vec<(String, Vec<TimeSeriesPoint>)>, ClientError> {
        let fetches = locations.iter().map(|location| async move {
            let point = location.geometry()?;
            let series = self
                .position_series(collection_id, &point, options, parameter_names)
                .await?;
            Ok::<_, ClientError>((location.name.clone(), series))
        });
        try_join_all(fetches).await
    }

    /// Batch fetch with whole-batch fallback: if any location fails, every
    /// location gets the synthetic series for `shape` instead, and the
    /// result is marked synthetic.
    pub async fn position_series_batch_or_synthetic(
        &self,
        collection_id: &str,
        locations: &[Location],
        options: &QueryOptions,
        shape: &SeriesShape,
    ) -> Fetched<Vec<(String, Vec<TimeSeriesPoint>)>> {
        let parameter_names = shape.parameters.clone();
        with_fallback(
            self.position_series_batch(collection_id, locations, options, &parameter_names),
            || {
                locations
                    .iter()
                    .map(|location| (location.name.clone(), synthesize_series(shape)))
                    .collect()
            },
        )
        .await
    }
}
