//! Request orchestration: build, send, normalize

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use log::{debug, trace, error};

use crate::config::AssistConfig;
use crate::error::Error;
use crate::request::{
  build_messages, ChatCompletionBody, ChatMessage, CompletionRequest,
  Purpose, WritingMode,
};
use crate::transport::{
  HttpTransport, Transport, TransportRequest,
};

/// Outcome handed back to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult
{   /// Extracted text; empty on failure
    pub text: String
  , pub succeeded: bool
  , /// User-facing reason when `succeeded` is false
    pub failure_reason: Option<String>
}

impl NormalizedResult
{   pub fn success(text: String) -> Self
    {   NormalizedResult
        {   text
          , succeeded: true
          , failure_reason: None
        }
    }

    /// Failure with a message suited to the call purpose
    pub fn failure(purpose: Purpose, error: &Error) -> Self
    {   NormalizedResult
        {   text: String::new()
          , succeeded: false
          , failure_reason: Some(failure_reason(purpose, error))
        }
    }
}

/// User-facing text for an error
pub fn failure_reason(purpose: Purpose, error: &Error) -> String
{   match (error, purpose)
    {   (Error::EmptyResponse, Purpose::Formula) => {
          "Failed to produce a formula, try a more detailed description"
            .to_string()
        }
      , (Error::EmptyResponse, _) => {
          "The assistant returned no usable content, please try again"
            .to_string()
        }
      , _ => error.to_string()
    }
}

/// Sends completion requests and normalizes the replies
///
/// Cheap to clone; clones share config and transport.
pub struct Assistant<T = HttpTransport>
{   config: Arc<AssistConfig>
  , transport: Arc<T>
}

impl<T> Clone for Assistant<T>
{   fn clone(&self) -> Self
    {   Assistant
        {   config: Arc::clone(&self.config)
          , transport: Arc::clone(&self.transport)
        }
    }
}

impl Assistant<HttpTransport>
{   /// Assistant over a reqwest transport
    pub fn from_config(config: AssistConfig) -> Result<Self, Error>
    {   config.validate()?;
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Assistant<T>
{   pub fn with_transport(config: AssistConfig, transport: T) -> Self
    {   debug!("Creating Assistant for {}", config.api_url);
        Assistant
        {   config: Arc::new(config)
          , transport: Arc::new(transport)
        }
    }

    pub fn config(&self) -> &AssistConfig
    {   &self.config
    }

    /// Run a request; every failure becomes `failure_reason`
    pub async fn complete(&self, request: CompletionRequest)
      -> NormalizedResult
    {   let purpose = request.purpose;
        match self.try_complete(request).await
        {   Ok(text) => NormalizedResult::success(text)
          , Err(e) => {
              error!("Completion failed: {}", e);
              NormalizedResult::failure(purpose, &e)
            }
        }
    }

    /// Run a request and surface the typed error
    pub async fn try_complete(&self, request: CompletionRequest)
      -> Result<String, Error>
    {   debug!(
          "Completing {:?} request ({} history messages)",
          request.purpose, request.history.len()
        );

        let messages = build_messages(
          &request,
          &self.config.response_language
        );
        let outgoing = TransportRequest
        {   url: self.config.api_url.clone()
          , bearer_token: self.config.api_key.clone()
          , body: ChatCompletionBody::new(&self.config.model, messages)
        };

        let response = self.transport.post(outgoing).await?;

        if !response.is_success()
        {   error!(
              "API error: {} - {}",
              response.status, response.body
            );
            return Err(Error::HttpError
            {   status: response.status
              , body: response.body
            });
        }

        let raw: serde_json::Value
          = serde_json::from_str(&response.body)?;
        trace!("Raw response: {:#}", raw);

        crate::normalize::normalize(&raw)
          .ok_or_else(|| {
            error!("No usable text in response: {}", raw);
            Error::EmptyResponse
          })
    }

    /// LaTeX for a plain-language description
    pub async fn generate_formula(&self, description: &str)
      -> NormalizedResult
    {   self.complete(CompletionRequest::formula(description)).await
    }

    /// Rewritten text for a passage of a note
    pub async fn writing_suggestion(
      &self
    , text: &str
    , context: Option<String>
    , mode: WritingMode
    ) -> NormalizedResult
    {   self.complete(
          CompletionRequest::writing(text, context, mode)
        ).await
    }

    /// Chat turn with optional context and prior conversation
    pub async fn chat(
      &self
    , prompt: &str
    , context: Option<String>
    , history: Vec<ChatMessage>
    ) -> NormalizedResult
    {   self.complete(
          CompletionRequest::chat(prompt, context, history)
        ).await
    }
}
