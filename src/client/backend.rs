// src/client/backend.rs
use crate::domain::Property;
use crate::search::{FilterCriteria, Page, PageRequest};
use reqwest::blocking::Client;
use thiserror::Error;

const USER_AGENT: &str = concat!("estates-search/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Source of listing pages for the search controller.
pub trait SearchBackend: Send + Sync + 'static {
    fn fetch(&self, criteria: &FilterCriteria, page: PageRequest) -> Result<Page<Property>, ClientError>;
}

/// Talks to `GET {base}/api/properties`.
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn listing_url(&self) -> String {
        format!("{}/api/properties", self.base_url)
    }
}

/// Query pairs sent for one listing request.
pub fn query_pairs(criteria: &FilterCriteria, page: PageRequest) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", page.page().to_string()),
        ("limit", page.limit().to_string()),
    ];
    pairs.extend(criteria.to_query_pairs());
    pairs
}

impl SearchBackend for HttpSearchBackend {
    fn fetch(&self, criteria: &FilterCriteria, page: PageRequest) -> Result<Page<Property>, ClientError> {
        let resp = self
            .client
            .get(self.listing_url())
            .query(&query_pairs(criteria, page))
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        resp.json::<Page<Property>>()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
