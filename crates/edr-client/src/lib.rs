//! Async client for OGC EDR coverage queries.
//!
//! Ties the workspace together: [`EdrClient`] issues position/area/metadata
//! requests against one EDR service, hands bodies to `coverage-decode`, and
//! offers explicit graceful degradation through [`with_fallback`] and the
//! batch helpers. Concurrency is plain fan-out: independent futures joined
//! at the call site, no shared mutable state, no cancellation model -
//! a dropped future is simply discarded.
//!
//! # Example
//!
//! ```no_run
//! use edr_client::{ClientConfig, EdrClient};
//! use edr_protocol::{Geometry, QueryOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EdrClient::new(ClientConfig::default())?;
//! let helsinki = Geometry::point(24.9384, 60.1699)?;
//! let options = QueryOptions::with_parameters(["Temperature", "WindSpeedMS"]);
//!
//! let series = client
//!     .position_series("harmonie_skandinavia_pinta", &helsinki, &options,
//!                      &["Temperature", "WindSpeedMS"])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod fallback;

// Re-export commonly used types
pub use client::{ClientError, EdrClient, FetchError};
pub use config::ClientConfig;
pub use fallback::{with_fallback, DataOrigin, Fetched, Location};
