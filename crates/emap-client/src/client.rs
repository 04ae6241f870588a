//! HTTP client for the records-management email-map endpoint.

use emap_model::{ChangeSet, Mapping, MappingList};
use emap_store::{EmailMapTransport, TransportError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// Path of the email-map admin endpoint, relative to the server base URL.
const EMAILMAP_PATH: &str = "api/rma/admin/emailmap";

/// Blocking HTTP implementation of [`EmailMapTransport`].
pub struct EmailMapClient {
    config: ClientConfig,
    client: Client,
}

impl EmailMapClient {
    /// Build a client from connection settings.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Ok(Self { config, client })
    }

    /// The full endpoint URL, tolerant of a trailing slash on the base URL.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            EMAILMAP_PATH
        )
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(USER_AGENT, concat!("emap/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json");
        match &self.config.basic_auth {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }

    fn read_mappings(response: Response) -> Result<Vec<Mapping>, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "no response body".to_string());
            warn!(status = status.as_u16(), "email-map request rejected");
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }
        let list: MappingList = response
            .json()
            .map_err(|error| TransportError::MalformedResponse(error.to_string()))?;
        Ok(list.into_mappings())
    }
}

impl EmailMapTransport for EmailMapClient {
    fn fetch_mappings(&self) -> Result<Vec<Mapping>, TransportError> {
        let url = self.endpoint_url();
        debug!(%url, "fetching email mappings");
        let response = self
            .prepare(self.client.get(&url))
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::read_mappings(response)
    }

    fn submit_changes(&self, changes: &ChangeSet) -> Result<Vec<Mapping>, TransportError> {
        let url = self.endpoint_url();
        debug!(%url, "submitting mapping changes");
        let response = self
            .prepare(self.client.post(&url))
            .json(changes)
            .send()
            .map_err(|error| TransportError::Network(error.to_string()))?;
        Self::read_mappings(response)
    }
}
