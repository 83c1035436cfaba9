//! OGC API - Environmental Data Retrieval (EDR) client protocol types.
//!
//! This crate provides the wire-facing half of an EDR client: lenient
//! CoverageJSON response types, collection listing types, and query
//! construction (WKT geometry, datetime values, shared query options).
//!
//! Deserialization here is deliberately forgiving. Upstream services vary
//! parameter-key casing between versions, omit sections that do not apply,
//! and null out individual samples; a response is only rejected when it is
//! not JSON at all. Structural validation (axis presence, array alignment)
//! belongs to the decoding layer built on top of these types.
//!
//! # Example
//!
//! ```rust
//! use edr_protocol::{Geometry, QueryOptions};
//!
//! let helsinki = Geometry::point(24.9384, 60.1699).unwrap();
//! let options = QueryOptions::with_parameters(["Temperature", "WindSpeedMS"]);
//! let pairs = options.to_query_pairs(&helsinki);
//! assert_eq!(pairs[0].1, "POINT(24.9384 60.1699)");
//! ```

pub mod collections;
pub mod coverage;
pub mod parameters;
pub mod queries;

// Re-export commonly used types
pub use collections::{Collection, CollectionList, Extent, Link, SpatialExtent, TemporalExtent};
pub use coverage::{Axis, AxisValue, CoverageResponse, Domain, NdArray};
pub use parameters::{I18nString, ObservedProperty, Parameter, Unit};
pub use queries::{DateTimeQuery, Geometry, GeometryError, QueryOptions};

/// Media types used in EDR requests and responses.
pub mod media_types {
    /// CoverageJSON media type.
    pub const COVERAGE_JSON: &str = "application/vnd.cov+json";
    /// JSON media type.
    pub const JSON: &str = "application/json";
}
