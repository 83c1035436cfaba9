//! Query construction for EDR data requests.
//!
//! The client encodes its query surface as URL parameters: a WKT geometry
//! in `coords`, a comma-joined `parameter-name` list, an optional `datetime`
//! instant or interval, and the output format in `f`. This module builds and
//! validates those values; the HTTP layer only assembles them into a URL.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building query geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Coordinate outside valid lon/lat range.
    #[error("Coordinate out of range: {0}")]
    OutOfRange(String),

    /// Polygon with too few distinct vertices.
    #[error("Polygon requires at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),
}

/// Query geometry, encoded as well-known text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Geometry {
    /// A single point (position queries).
    Point {
        /// Longitude in degrees east.
        lon: f64,
        /// Latitude in degrees north.
        lat: f64,
    },
    /// A polygon ring (area queries). Stored unclosed; the WKT encoder
    /// closes the ring.
    Polygon(Vec<(f64, f64)>),
}

impl Geometry {
    /// Build a validated point geometry.
    pub fn point(lon: f64, lat: f64) -> Result<Self, GeometryError> {
        Self::validate_coordinates(lon, lat)?;
        Ok(Geometry::Point { lon, lat })
    }

    /// Build a validated polygon geometry from its vertices.
    ///
    /// An explicitly closed input ring (last vertex equal to the first) is
    /// accepted; the duplicate is dropped so encoding stays canonical.
    pub fn polygon(mut vertices: Vec<(f64, f64)>) -> Result<Self, GeometryError> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeometryError::DegeneratePolygon(vertices.len()));
        }
        for &(lon, lat) in &vertices {
            Self::validate_coordinates(lon, lat)?;
        }
        Ok(Geometry::Polygon(vertices))
    }

    fn validate_coordinates(lon: f64, lat: f64) -> Result<(), GeometryError> {
        if !(-180.0..=180.0).contains(&lon) || !lon.is_finite() {
            return Err(GeometryError::OutOfRange(format!(
                "Longitude must be between -180 and 180, got {}",
                lon
            )));
        }
        if !(-90.0..=90.0).contains(&lat) || !lat.is_finite() {
            return Err(GeometryError::OutOfRange(format!(
                "Latitude must be between -90 and 90, got {}",
                lat
            )));
        }
        Ok(())
    }

    /// Encode as a WKT string: `POINT(lon lat)` or `POLYGON((...))` with
    /// the ring closed.
    pub fn to_wkt(&self) -> String {
        match self {
            Geometry::Point { lon, lat } => format!("POINT({} {})", lon, lat),
            Geometry::Polygon(vertices) => {
                let mut ring: Vec<String> = vertices
                    .iter()
                    .map(|(lon, lat)| format!("{} {}", lon, lat))
                    .collect();
                if let Some(first) = ring.first().cloned() {
                    ring.push(first);
                }
                format!("POLYGON(({}))", ring.join(","))
            }
        }
    }
}

/// The `datetime` query value: an instant or an interval.
///
/// Interval bounds may be open; an open bound encodes as `..` per the
/// OGC API conventions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DateTimeQuery {
    /// A specific instant.
    Instant(DateTime<Utc>),

    /// An interval with optionally open start or end.
    Interval {
        /// Inclusive start, or open.
        start: Option<DateTime<Utc>>,
        /// Inclusive end, or open.
        end: Option<DateTime<Utc>>,
    },
}

impl DateTimeQuery {
    /// A closed interval.
    pub fn range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        DateTimeQuery::Interval {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Encode as the `datetime=` query value.
    pub fn to_query_value(&self) -> String {
        fn fmt(dt: &DateTime<Utc>) -> String {
            dt.to_rfc3339_opts(SecondsFormat::Secs, true)
        }
        match self {
            DateTimeQuery::Instant(dt) => fmt(dt),
            DateTimeQuery::Interval { start, end } => {
                let start = start.as_ref().map(fmt).unwrap_or_else(|| "..".to_string());
                let end = end.as_ref().map(fmt).unwrap_or_else(|| "..".to_string());
                format!("{}/{}", start, end)
            }
        }
    }
}

/// Options shared by position and area data queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryOptions {
    /// Parameter names to request; joined with commas into `parameter-name`.
    pub parameter_names: Vec<String>,

    /// Requested instant or interval.
    pub datetime: Option<DateTimeQuery>,

    /// Output format for `f`; defaults to CoverageJSON.
    pub format: Option<String>,
}

impl QueryOptions {
    /// Options requesting the given parameters.
    pub fn with_parameters<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameter_names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the datetime instant or interval.
    pub fn with_datetime(mut self, datetime: DateTimeQuery) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// The URL query pairs for this request, geometry included.
    ///
    /// Ordering is stable: coords, f, parameter-name, datetime.
    pub fn to_query_pairs(&self, geometry: &Geometry) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("coords".to_string(), geometry.to_wkt()),
            (
                "f".to_string(),
                self.format.clone().unwrap_or_else(|| "CoverageJSON".to_string()),
            ),
        ];
        if !self.parameter_names.is_empty() {
            pairs.push(("parameter-name".to_string(), self.parameter_names.join(",")));
        }
        if let Some(dt) = &self.datetime {
            pairs.push(("datetime".to_string(), dt.to_query_value()));
        }
        pairs
    }
}
