use std::future::Future;
use std::time::Duration;
use log::{debug, trace, error};

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport
{   http_client: reqwest::Client
}

impl HttpTransport
{   /// Build a client, with a request timeout when one is given
    pub fn new(timeout: Option<Duration>)
      -> Result<Self, crate::error::Error>
    {   debug!("Creating HttpTransport (timeout: {:?})", timeout);
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout
        {   builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;
        Ok(HttpTransport { http_client })
    }

    /// Build a client from assistant configuration
    pub fn from_config(config: &crate::config::AssistConfig)
      -> Result<Self, crate::error::Error>
    {   Self::new(config.timeout_secs.map(Duration::from_secs))
    }
}

impl super::Transport for HttpTransport
{   fn post(
      &self
    , request: super::TransportRequest
    ) -> impl Future<
        Output = Result<super::TransportResponse, crate::error::Error>
      > + Send
    {   trace!("POST {} request: {:?}", request.url, request.body);

        let mut builder = self.http_client
          .post(&request.url)
          .header("Content-Type", "application/json")
          .json(&request.body);
        if let Some(token) = &request.bearer_token
        {   builder = builder
              .header("Authorization", format!("Bearer {}", token));
        }

        async move {
          let response = builder
            .send()
            .await
            .map_err(|e| {
              error!("HTTP error: {}", e);
              crate::error::Error::TransportError(e.to_string())
            })?;

          let status = response.status().as_u16();
          trace!("Response status: {}", status);

          let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            crate::error::Error::TransportError(e.to_string())
          })?;

          Ok::<_, crate::error::Error>(
            super::TransportResponse { status, body }
          )
        }
    }
}
