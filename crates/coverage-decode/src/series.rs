//! Point-mode decoding: time axis + parameter ranges into aligned records.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use edr_protocol::CoverageResponse;

use crate::errors::DecodeError;

/// One time step of a decoded series, with one value slot per requested
/// parameter.
///
/// Instances are built fresh per decode and never mutated afterwards; the
/// source response is treated as read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    /// Original timestamp string from the time axis.
    pub time: String,

    /// Epoch milliseconds parsed from `time`; `None` when the timestamp
    /// does not parse. Used for sorting and plotting, never for ordering
    /// the decode output (which stays in source order).
    pub timestamp_millis: Option<i64>,

    /// Requested parameter name to normalized value. `None` marks a null,
    /// absent or non-numeric sample.
    pub values: BTreeMap<String, Option<f64>>,
}

impl TimeSeriesPoint {
    /// The value for a parameter, flattening "not requested" and "null
    /// sample" to `None`.
    pub fn value(&self, parameter: &str) -> Option<f64> {
        self.values.get(parameter).copied().flatten()
    }
}

/// Decode a point-mode response into one record per time step.
///
/// Parameter lookup is case-insensitive (see [`CoverageResponse::range`]).
/// A requested parameter absent from `ranges` fills its column with `None`
/// and logs a warning - servers omit parameters that do not apply. A present
/// range whose length does not match the time axis is a structural error.
///
/// Output order is exactly the source time order; no re-sort happens even
/// when timestamps are out of order or unparseable.
pub fn decode_series<S: AsRef<str>>(
    response: &CoverageResponse,
    parameter_names: &[S],
) -> Result<Vec<TimeSeriesPoint>, DecodeError> {
    let times = response.time_values().ok_or(DecodeError::MissingTimeAxis)?;
    let steps = times.len();

    let mut columns = Vec::with_capacity(parameter_names.len());
    for name in parameter_names {
        let name = name.as_ref();
        match response.range(name) {
            Some(range) => {
                if range.len() != steps {
                    return Err(DecodeError::LengthMismatch {
                        parameter: name.to_string(),
                        expected: steps,
                        actual: range.len(),
                    });
                }
                columns.push((name, Some(range)));
            }
            None => {
                warn!(parameter = name, "requested parameter absent from ranges");
                columns.push((name, None));
            }
        }
    }

    let mut points = Vec::with_capacity(steps);
    for (index, time) in times.into_iter().enumerate() {
        let timestamp_millis = DateTime::parse_from_rfc3339(&time)
            .ok()
            .map(|dt| dt.timestamp_millis());
        let values = columns
            .iter()
            .map(|(name, range)| {
                let value = range.and_then(|r| r.value_at(index));
                (name.to_string(), value)
            })
            .collect();
        points.push(TimeSeriesPoint {
            time,
            timestamp_millis,
            values,
        });
    }
    Ok(points)
}
