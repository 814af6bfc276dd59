//! Provider adapters.
//!
//! Each provider is a plain value: how to address it, what to send, and how
//! to read its answer. The acquirer walks a list of them in order and treats
//! them uniformly.
//!
//! | Provider | Method | Target |
//! |----------|--------|--------|
//! | [`ProviderId::Pied`] | GET | `{base}/user/{handle}` |
//! | [`ProviderId::Restful`] | POST | `{base}/profile` |
//! | [`ProviderId::Tashif`] | GET | `{base}/{handle}` |

pub mod pied;
pub mod restful;
pub mod tashif;

mod payload;

use std::fmt::{Debug, Formatter};

use serde_json::Value;
use thiserror::Error;

use crate::http_client::{HttpMethod, HttpRequest};
use crate::{ProviderId, StatsDraft};

/// `(base_url, url-encoded handle) -> request url`.
pub type TargetBuilder = fn(&str, &str) -> String;
/// `handle -> json body`.
pub type BodyBuilder = fn(&str) -> Value;
/// `raw body -> unvalidated stats`.
pub type ResponseMapper = fn(&str) -> Result<StatsDraft, MappingError>;

/// Why a provider payload could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("response body is not valid json: {0}")]
    InvalidJson(String),
    #[error("response json does not match the provider schema: {0}")]
    UnexpectedShape(String),
}

impl From<serde_json::Error> for MappingError {
    fn from(error: serde_json::Error) -> Self {
        match error.classify() {
            serde_json::error::Category::Data => Self::UnexpectedShape(error.to_string()),
            _ => Self::InvalidJson(error.to_string()),
        }
    }
}

/// One configured stats provider.
#[derive(Clone)]
pub struct ProviderAdapter {
    id: ProviderId,
    method: HttpMethod,
    base_url: String,
    target: TargetBuilder,
    body: Option<BodyBuilder>,
    map: ResponseMapper,
}

impl ProviderAdapter {
    pub fn for_provider(id: ProviderId) -> Self {
        match id {
            ProviderId::Pied => pied::adapter(),
            ProviderId::Restful => restful::adapter(),
            ProviderId::Tashif => tashif::adapter(),
        }
    }

    /// Points the adapter at another deployment of the same api.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub const fn id(&self) -> ProviderId {
        self.id
    }

    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request url with a `{handle}` placeholder, for diagnostics.
    pub fn target_template(&self) -> String {
        (self.target)(&self.base_url, "{handle}")
    }

    pub fn build_request(&self, handle: &str, timeout_ms: u64) -> HttpRequest {
        let url = (self.target)(&self.base_url, &urlencoding::encode(handle));
        let request = HttpRequest::new(self.method, url)
            .with_header("accept", "application/json")
            .with_timeout_ms(timeout_ms);

        match self.body {
            Some(body) => request.with_json_body(&body(handle)),
            None => request,
        }
    }

    pub fn map_response(&self, body: &str) -> Result<StatsDraft, MappingError> {
        (self.map)(body)
    }
}

impl Debug for ProviderAdapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("target", &self.target_template())
            .finish()
    }
}

/// The built-in providers in their default fallback order.
pub fn default_adapters() -> Vec<ProviderAdapter> {
    ProviderId::ALL
        .into_iter()
        .map(ProviderAdapter::for_provider)
        .collect()
}
