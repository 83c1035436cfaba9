//! CoverageJSON response generators.
//!
//! These build wire-shaped [`CoverageResponse`] values directly, so tests
//! can exercise decoding without JSON string plumbing. Shapes mirror what
//! the upstream service actually returns for position and area queries.

use std::collections::HashMap;

use edr_protocol::coverage::{Axis, AxisValue, CoverageResponse, Domain, NdArray};

/// Build a point-series response: a `t` axis plus one aligned range per
/// `(parameter, values)` pair. Ranges keep the casing given here, so tests
/// can probe case-insensitive lookup.
pub fn point_series_response(
    times: &[&str],
    ranges: &[(&str, Vec<Option<f64>>)],
) -> CoverageResponse {
    let mut axes = HashMap::new();
    axes.insert(
        "t".to_string(),
        Axis::Values {
            values: times
                .iter()
                .map(|t| AxisValue::String(t.to_string()))
                .collect(),
        },
    );

    let ranges: HashMap<String, NdArray> = ranges
        .iter()
        .map(|(name, values)| (name.to_string(), NdArray::from_values(values.clone())))
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

/// Build an area response with `x`/`y`/`t` axes and one range flattened
/// row-major as `t,y,x`. The caller supplies the flat values; length
/// mismatches are passed through untouched so truncation handling can be
/// tested.
pub fn grid_response(
    xs: &[f64],
    ys: &[f64],
    times: &[&str],
    parameter: &str,
    values: Vec<Option<f64>>,
) -> CoverageResponse {
    let mut axes = HashMap::new();
    axes.insert(
        "x".to_string(),
        Axis::Values {
            values: xs.iter().map(|&v| AxisValue::Float(v)).collect(),
        },
    );
    axes.insert(
        "y".to_string(),
        Axis::Values {
            values: ys.iter().map(|&v| AxisValue::Float(v)).collect(),
        },
    );
    axes.insert(
        "t".to_string(),
        Axis::Values {
            values: times
                .iter()
                .map(|t| AxisValue::String(t.to_string()))
                .collect(),
        },
    );

    let mut array = NdArray::from_values(values);
    array.axis_names = Some(vec!["t".to_string(), "y".to_string(), "x".to_string()]);
    array.shape = Some(vec![times.len(), ys.len(), xs.len()]);

    let mut ranges = HashMap::new();
    ranges.insert(parameter.to_string(), array);

    CoverageResponse {
        type_: Some("Coverage".to_string()),
        domain: Some(Domain {
            type_: Some("Domain".to_string()),
            domain_type: Some("Grid".to_string()),
            axes,
        }),
        parameters: None,
        ranges: Some(ranges),
    }
}
