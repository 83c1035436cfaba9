//! Deterministic synthetic data for graceful degradation.
//!
//! When a fetch or decode fails, callers can substitute a synthetic dataset
//! with exactly the shape the live pipeline would have produced, so
//! rendering code never branches on "no data". Values are smooth periodic
//! functions of the step index and parameter name - no randomness - which
//! keeps fallback output reproducible and testable.
//!
//! Substitution is always the caller's explicit choice, and substituted
//! data must be presented to users as demo data, never as live.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use edr_protocol::coverage::{Axis, AxisValue, CoverageResponse, Domain, NdArray};

use crate::grid::GridPoint;
use crate::series::TimeSeriesPoint;

/// Shape hint for a synthetic point series.
#[derive(Debug, Clone)]
pub struct SeriesShape {
    /// Timestamp of the first step.
    pub start: DateTime<Utc>,

    /// Spacing between steps.
    pub step: Duration,

    /// Number of time steps.
    pub time_steps: usize,

    /// Parameter names to populate, with the requested casing.
    pub parameters: Vec<String>,
}

impl SeriesShape {
    /// An hourly series beginning at `start`.
    pub fn hourly<I, S>(start: DateTime<Utc>, time_steps: usize, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start,
            step: Duration::hours(1),
            time_steps,
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }
}

/// Shape hint for a synthetic grid.
#[derive(Debug, Clone)]
pub struct GridShape {
    /// Inclusive longitude range of the x axis.
    pub lon_range: (f64, f64),

    /// Inclusive latitude range of the y axis.
    pub lat_range: (f64, f64),

    /// Number of x cells.
    pub nx: usize,

    /// Number of y cells.
    pub ny: usize,
}

/// Baseline and swing for a parameter's synthetic diurnal curve.
///
/// Well-known parameter names get plausible magnitudes; anything else gets
/// a generic unit-scale wave. The name also seeds a phase shift so two
/// parameters never produce identical curves.
fn curve_for(parameter: &str) -> (f64, f64) {
    match parameter.to_ascii_lowercase().as_str() {
        "temperature" | "dewpoint" => (5.0, 8.0),
        "windspeedms" | "windgust" => (6.0, 4.0),
        "humidity" => (75.0, 20.0),
        "pressure" => (1013.0, 12.0),
        "precipitation1h" | "precipitationamount" => (0.4, 0.4),
        _ => (1.0, 1.0),
    }
}

fn phase_for(parameter: &str) -> f64 {
    let seed: u32 = parameter
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    (seed % 24) as f64 / 24.0 * std::f64::consts::TAU
}

fn sample(parameter: &str, index: usize) -> f64 {
    let (base, amplitude) = curve_for(parameter);
    let angle = index as f64 / 24.0 * std::f64::consts::TAU + phase_for(parameter);
    base + amplitude * angle.sin()
}

/// Synthesize a decoded point series matching `shape`.
///
/// Timestamps are strictly increasing (provided `shape.step` is positive)
/// and every value slot is populated.
pub fn synthesize_series(shape: &SeriesShape) -> Vec<TimeSeriesPoint> {
    (0..shape.time_steps)
        .map(|index| {
            let at = shape.start + shape.step * index as i32;
            let values: BTreeMap<String, Option<f64>> = shape
                .parameters
                .iter()
                .map(|name| (name.clone(), Some(sample(name, index))))
                .collect();
            TimeSeriesPoint {
                time: at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                timestamp_millis: Some(at.timestamp_millis()),
                values,
            }
        })
        .collect()
}

/// Synthesize a wire-shaped response matching `shape`, for call sites that
/// substitute before decoding rather than after.
pub fn synthesize_response(shape: &SeriesShape) -> CoverageResponse {
    let times: Vec<String> = (0..shape.time_steps)
        .map(|index| {
            (shape.start + shape.step * index as i32)
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        })
        .collect();

    let mut axes = HashMap::new();
    axes.insert(
        "t".to_string(),
        Axis::Values {
            values: times.into_iter().map(AxisValue::String).collect(),
        },
    );

    let ranges: HashMap<String, NdArray> = shape
        .parameters
        .iter()
        .map(|name| {
            let values = (0..shape.time_steps)
                .map(|index| Some(sample(name, index)))
                .collect();
            (name.clone(), NdArray::from_values(values))
        })
        .collect();

    CoverageResponse {
        type_: Some("Coverage".to_string()),
        domain: Some(Domain {
            type_: Some("Domain".to_string()),
            domain_type: Some("PointSeries".to_string()),
            axes,
        }),
        parameters: None,
        ranges: Some(ranges),
    }
}

/// Synthesize one time step of a grid matching `shape`: exactly
/// `nx * ny` cells in row-major y-outer/x-inner order, with a smooth
/// spatial field.
pub fn synthesize_grid(shape: &GridShape) -> Vec<GridPoint> {
    let lon_step = span(shape.lon_range, shape.nx);
    let lat_step = span(shape.lat_range, shape.ny);

    let mut cells = Vec::with_capacity(shape.nx * shape.ny);
    for y in 0..shape.ny {
        let latitude = shape.lat_range.0 + lat_step * y as f64;
        for x in 0..shape.nx {
            let longitude = shape.lon_range.0 + lon_step * x as f64;
            let value = 4.0 + 3.0 * (longitude.to_radians() * 20.0).sin()
                - 2.0 * (latitude.to_radians() * 20.0).cos();
            cells.push(GridPoint {
                longitude,
                latitude,
                value: Some(value),
            });
        }
    }
    cells
}

fn span((low, high): (f64, f64), cells: usize) -> f64 {
    if cells > 1 {
        (high - low) / (cells - 1) as f64
    } else {
        0.0
    }
}
