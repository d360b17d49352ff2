//! Transport seam between the assistant and the network

pub mod http;

use std::future::Future;

// Re-export for convenience
pub use http::HttpTransport;

/// Outgoing POST as the assistant describes it
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest
{   /// Endpoint URL
    pub url: String
  , /// Bearer token; no Authorization header when absent
    pub bearer_token: Option<String>
  , /// JSON body
    pub body: crate::request::ChatCompletionBody
}

/// Status and raw body text of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse
{   pub status: u16
  , pub body: String
}

impl TransportResponse
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// Anything that can POST a completion body and return the reply
///
/// Failures to reach the endpoint or read its reply are reported as
/// `Error::TransportError`; non-success statuses are not errors here.
pub trait Transport: Send + Sync + 'static
{   fn post(
      &self
    , request: TransportRequest
    ) -> impl Future<
        Output = Result<TransportResponse, crate::error::Error>
      > + Send;
}
