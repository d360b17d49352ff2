use std::fmt;

/// Error type for assistant operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Endpoint answered with a non-success status
    HttpError
    {   status: u16
      , body: String
    }
  , /// Network failure or unreadable response body
    TransportError(String)
  , /// Call succeeded but no usable text could be extracted
    EmptyResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Backend did not confirm in time
    Timeout
  , /// Generic error
    Other(String)
}

impl Error
{   /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::HttpError { status, .. } => Some(*status)
          , _ => None
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::HttpError { status, body } => {
              write!(f, "API error: {} - {}", status, body)
            }
          , Error::TransportError(msg) => {
              write!(f, "Transport error: {}", msg)
            }
          , Error::EmptyResponse => {
              write!(f,
                "API returned empty or invalid content"
              )
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::TransportError(
          format!("invalid JSON body: {}", e)
        )
    }
}
