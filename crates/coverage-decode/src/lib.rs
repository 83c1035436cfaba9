//! Decoding of CoverageJSON responses into display-ready records.
//!
//! This crate is the core transformation pipeline between the EDR wire
//! format and chart/map/table renderers:
//!
//! - [`decode_series`] zips the time axis with parameter value arrays into
//!   index-aligned [`TimeSeriesPoint`] records (point queries).
//! - [`decode_grid`] walks a flattened `t,y,x` grid and attaches geographic
//!   coordinates to each cell (area queries).
//! - [`aggregate_by_day`] buckets a series by UTC calendar day and reduces
//!   to min/max/mean plus a modal category.
//! - [`synthetic`] produces deterministic stand-in data with the same shape
//!   as a live decode, for explicit fallback at the call site.
//!
//! Every operation is pure and synchronous: it reads its input, allocates
//! its output, and touches nothing else. Structural violations (missing
//! time axis, misaligned point-mode arrays) surface as [`DecodeError`];
//! partial data (absent parameters, truncated grids) degrades to missing
//! values with a `tracing` warning.

pub mod aggregate;
pub mod errors;
pub mod grid;
pub mod series;
pub mod synthetic;

// Re-export commonly used items
pub use aggregate::{aggregate_by_day, DailyAggregate};
pub use errors::DecodeError;
pub use grid::{decode_grid, ColorScale, GridPoint};
pub use series::{decode_series, TimeSeriesPoint};
pub use synthetic::{synthesize_grid, synthesize_response, synthesize_series, GridShape, SeriesShape};
