//! Area-mode decoding: a flattened `t,y,x` grid into coordinate-tagged cells.

use serde::{Deserialize, Serialize};
use tracing::warn;

use edr_protocol::CoverageResponse;

use crate::errors::DecodeError;

/// One cell of a decoded grid at a fixed time step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridPoint {
    /// Longitude from the x axis.
    pub longitude: f64,

    /// Latitude from the y axis.
    pub latitude: f64,

    /// Normalized parameter value; `None` for null, absent or truncated data.
    pub value: Option<f64>,
}

/// Decode one time step of an area response into `|y| * |x|` cells.
///
/// The range array is assumed flattened row-major with time outermost:
/// `index = t*(|y|*|x|) + y*|x| + x`. That ordering is a documented
/// assumption about the upstream service rather than a schema guarantee,
/// so a length mismatch is logged and decoding continues with
/// bounds-checked access - a truncated grid yields `None` cells, never a
/// panic. Output is row-major, y outer, x inner, matching the flattening.
pub fn decode_grid(
    response: &CoverageResponse,
    parameter_name: &str,
    time_index: usize,
) -> Result<Vec<GridPoint>, DecodeError> {
    let xs = response
        .axis_numbers("x")
        .filter(|xs| !xs.is_empty())
        .ok_or(DecodeError::MissingSpatialAxes)?;
    let ys = response
        .axis_numbers("y")
        .filter(|ys| !ys.is_empty())
        .ok_or(DecodeError::MissingSpatialAxes)?;

    // Area responses without a t axis are a single implicit time step.
    let time_steps = response.time_values().map(|t| t.len()).unwrap_or(1);
    if time_index >= time_steps {
        warn!(
            time_index,
            time_steps, "grid time index beyond the time axis; cells will be empty"
        );
    }

    let range = response.range(parameter_name);
    match range {
        Some(range) => {
            let expected = time_steps * ys.len() * xs.len();
            if range.len() != expected {
                warn!(
                    parameter = parameter_name,
                    expected,
                    actual = range.len(),
                    "grid range length does not match |t|*|y|*|x|; using bounds-checked access"
                );
            }
        }
        None => {
            warn!(parameter = parameter_name, "requested parameter absent from ranges");
        }
    }

    let plane = ys.len() * xs.len();
    let mut cells = Vec::with_capacity(plane);
    for (y_index, &latitude) in ys.iter().enumerate() {
        for (x_index, &longitude) in xs.iter().enumerate() {
            let flat = time_index * plane + y_index * xs.len() + x_index;
            let value = range.and_then(|r| r.value_at(flat));
            cells.push(GridPoint {
                longitude,
                latitude,
                value,
            });
        }
    }
    Ok(cells)
}

/// A threshold color scale mapping values to presentation colors.
///
/// Purely presentational: a cell's color is a function of its value and
/// plays no part in decode correctness.
#[derive(Debug, Clone)]
pub struct ColorScale {
    /// Ascending (threshold, color) stops; a value takes the color of the
    /// last stop it reaches.
    stops: Vec<(f64, &'static str)>,

    /// Color for values below the first stop.
    below: &'static str,

    /// Color for missing values.
    missing: &'static str,
}

impl ColorScale {
    /// Build a scale from ascending stops.
    pub fn new(stops: Vec<(f64, &'static str)>, below: &'static str, missing: &'static str) -> Self {
        debug_assert!(stops.windows(2).all(|w| w[0].0 <= w[1].0));
        Self {
            stops,
            below,
            missing,
        }
    }

    /// Temperature scale in degrees Celsius, tuned for Nordic winters.
    pub fn temperature() -> Self {
        Self::new(
            vec![
                (-20.0, "#2166ac"),
                (-10.0, "#4393c3"),
                (-5.0, "#92c5de"),
                (0.0, "#d1e5f0"),
                (5.0, "#fddbc7"),
                (10.0, "#f4a582"),
                (20.0, "#d6604d"),
                (25.0, "#b2182b"),
            ],
            "#053061",
            "#cccccc",
        )
    }

    /// The presentation color for a cell value.
    pub fn color_for(&self, value: Option<f64>) -> &'static str {
        let Some(value) = value else {
            return self.missing;
        };
        let mut color = self.below;
        for &(threshold, stop_color) in &self.stops {
            if value >= threshold {
                color = stop_color;
            } else {
                break;
            }
        }
        color
    }
}
