//! The EDR HTTP client.
//!
//! One GET per operation against a fixed query surface: position and area
//! data queries returning CoverageJSON bodies, plus the collection metadata
//! endpoints. The fetch layer parses JSON and nothing more; structural
//! validation of coverage bodies happens in `coverage-decode`.
//!
//! There is no caching and no automatic retry. A retry/backoff policy (as
//! used for bulk model downloads elsewhere) is a deliberate non-feature
//! here: callers fall back to synthetic data instead.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use coverage_decode::{
    decode_grid, decode_series, DecodeError, GridPoint, TimeSeriesPoint,
};
use edr_protocol::{Collection, CollectionList, CoverageResponse, Geometry, QueryOptions};

use crate::config::ClientConfig;

/// Errors from issuing a request and obtaining a parsed JSON body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
    },

    /// The network call itself failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured request budget elapsed before completion.
    #[error("Request exceeded the {0:?} timeout budget")]
    Timeout(Duration),

    /// The body was not parseable JSON of the expected shape.
    #[error("Invalid response body: {0}")]
    Body(#[source] serde_json::Error),
}

/// Errors from the combined fetch-and-decode operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response arrived but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A query geometry was invalid before any request was made.
    #[error(transparent)]
    Geometry(#[from] edr_protocol::GeometryError),
}

/// Asynchronous client for one EDR service.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct EdrClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl EdrClient {
    /// Build a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, config })
    }

    /// Build a client for `base_url` with default configuration.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::new(ClientConfig::new(base_url))
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {base}/collections/{id}/position` - raw coverage body for a
    /// point geometry.
    #[instrument(skip(self, options), fields(collection = collection_id))]
    pub async fn position(
        &self,
        collection_id: &str,
        point: &Geometry,
        options: &QueryOptions,
    ) -> Result<CoverageResponse, FetchError> {
        let url = self.data_url(collection_id, "position");
        self.get_json(&url, &options.to_query_pairs(point)).await
    }

    /// `GET {base}/collections/{id}/area` - raw coverage body for a
    /// polygon geometry.
    #[instrument(skip(self, options), fields(collection = collection_id))]
    pub async fn area(
        &self,
        collection_id: &str,
        polygon: &Geometry,
        options: &QueryOptions,
    ) -> Result<CoverageResponse, FetchError> {
        let url = self.data_url(collection_id, "area");
        self.get_json(&url, &options.to_query_pairs(polygon)).await
    }

    /// `GET {base}/collections` - the collection listing.
    pub async fn collections(&self) -> Result<CollectionList, FetchError> {
        let url = format!("{}/collections", self.config.base_url);
        self.get_json(&url, &[]).await
    }

    /// `GET {base}/collections/{id}` - metadata for one collection.
    pub async fn collection(&self, collection_id: &str) -> Result<Collection, FetchError> {
        let url = format!("{}/collections/{}", self.config.base_url, collection_id);
        self.get_json(&url, &[]).await
    }

    /// Fetch a position query and decode it into a time series in one step.
    pub async fn position_series<S: AsRef<str>>(
        &self,
        collection_id: &str,
        point: &Geometry,
        options: &QueryOptions,
        parameter_names: &[S],
    ) -> Result<Vec<TimeSeriesPoint>, ClientError> {
        let response = self.position(collection_id, point, options).await?;
        Ok(decode_series(&response, parameter_names)?)
    }

    /// Fetch an area query and decode one time step into a grid.
    pub async fn area_grid(
        &self,
        collection_id: &str,
        polygon: &Geometry,
        options: &QueryOptions,
        parameter_name: &str,
        time_index: usize,
    ) -> Result<Vec<GridPoint>, ClientError> {
        let response = self.area(collection_id, polygon, options).await?;
        Ok(decode_grid(&response, parameter_name, time_index)?)
    }

    fn data_url(&self, collection_id: &str, query_type: &str) -> String {
        format!(
            "{}/collections/{}/{}",
            self.config.base_url, collection_id, query_type
        )
    }

    /// Issue one GET and parse the JSON body, applying the configured
    /// timeout budget when one is set.
    ///
    /// The budget covers the whole call - connection, send and body read
    /// together - so a server that trickles each phase in just under the
    /// limit still gets abandoned once the budget elapses.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, FetchError> {
        debug!(url, "issuing EDR request");
        let fetch = async {
            let response = self.http.get(url).query(query).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(FetchError::Body)
        };

        match self.config.request_timeout {
            Some(budget) => tokio::time::timeout(budget, fetch)
                .await
                .map_err(|_| FetchError::Timeout(budget))?,
            None => fetch.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EdrClient {
        EdrClient::with_base_url("https://example.fi/edr/").unwrap()
    }

    #[test]
    fn test_data_url_assembly() {
        let client = client();
        assert_eq!(
            client.data_url("harmonie_skandinavia_pinta", "position"),
            "https://example.fi/edr/collections/harmonie_skandinavia_pinta/position"
        );
        assert_eq!(
            client.data_url("wave_forecast", "area"),
            "https://example.fi/edr/collections/wave_forecast/area"
        );
    }

    #[test]
    fn test_client_is_cloneable() {
        let client = client();
        let clone = client.clone();
        assert_eq!(clone.config().base_url, client.config().base_url);
    }

    #[tokio::test]
    async fn test_timeout_budget_spans_send_and_body_read() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Headers and body each land inside the budget on their own, but
        // the exchange as a whole overruns it.
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            tokio::time::sleep(Duration::from_millis(200)).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\n")
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = socket.write_all(b"{}").await;
        });

        let config = ClientConfig::new(format!("http://{addr}/edr"))
            .with_request_timeout(Duration::from_millis(300));
        let client = EdrClient::new(config).unwrap();

        let point = Geometry::point(24.94, 60.17).unwrap();
        let result = client
            .position("test", &point, &QueryOptions::default())
            .await;
        assert!(matches!(result, Err(FetchError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_network_failure_is_fetch_error() {
        // Reserved TEST-NET address; the connect must fail fast.
        let config = ClientConfig::new("http://192.0.2.1/edr")
            .with_request_timeout(Duration::from_millis(250));
        let client = EdrClient::new(config).unwrap();

        let point = Geometry::point(24.94, 60.17).unwrap();
        let result = client
            .position("test", &point, &QueryOptions::default())
            .await;
        assert!(matches!(
            result,
            Err(FetchError::Network(_) | FetchError::Timeout(_))
        ));
    }
}
