//! Configuration for the completion endpoint

use serde::{Deserialize, Serialize};
use log::{debug, warn};

/// Endpoint used when `AI_API_URL` is not set
pub const DEFAULT_API_URL: &str
  = "https://api.zetatechs.com/v1/messages";

/// Model id sent with every request unless overridden
pub const DEFAULT_MODEL: &str = "gpt-5-chat-free";

/// Language the writing and chat prompts ask for
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "Chinese";

pub const ENV_API_URL: &str = "AI_API_URL";
pub const ENV_API_KEY: &str = "AI_API_KEY";
pub const ENV_MODEL: &str = "AI_MODEL";
pub const ENV_RESPONSE_LANGUAGE: &str = "AI_RESPONSE_LANGUAGE";
pub const ENV_TIMEOUT_SECS: &str = "AI_TIMEOUT_SECS";

/// Assistant configuration
///
/// Loaded once at startup and handed to the assistant;
/// nothing reads the environment after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig
{   /// Chat-completion endpoint URL
    pub api_url: String
  , /// Bearer token; requests go out unauthenticated without it
    pub api_key: Option<String>
  , /// Model identifier
    pub model: String
  , /// Language requested from writing and chat prompts
    pub response_language: String
  , /// Transport timeout in seconds (none by default)
    pub timeout_secs: Option<u64>
}

impl Default for AssistConfig
{   fn default() -> Self
    {   AssistConfig
        {   api_url: DEFAULT_API_URL.to_string()
          , api_key: None
          , model: DEFAULT_MODEL.to_string()
          , response_language
              : DEFAULT_RESPONSE_LANGUAGE.to_string()
          , timeout_secs: None
        }
    }
}

impl AssistConfig
{   /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable source
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where
      F: Fn(&str) -> Option<String>
    {   let get = |name: &str| {
          lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        };

        let mut config = AssistConfig::default();
        if let Some(url) = get(ENV_API_URL)
        {   config.api_url = url;
        }
        config.api_key = get(ENV_API_KEY);
        if let Some(model) = get(ENV_MODEL)
        {   config.model = model;
        }
        if let Some(language) = get(ENV_RESPONSE_LANGUAGE)
        {   config.response_language = language;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS)
        {   let secs = raw.parse::<u64>().map_err(|_| {
              crate::error::Error::InvalidConfiguration(
                format!("{} is not a number: {}",
                  ENV_TIMEOUT_SECS, raw
                )
              )
            })?;
            config.timeout_secs = Some(secs);
        }

        if config.api_key.is_none()
        {   warn!(
              "{} not set; requests will be unauthenticated",
              ENV_API_KEY
            );
        }
        debug!(
          "Loaded config: url={} model={}",
          config.api_url, config.model
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON; missing fields use defaults
    pub fn from_json(json: &str)
      -> Result<Self, crate::error::Error>
    {   let config: AssistConfig = serde_json::from_str(json)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(
              e.to_string()
            )
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the endpoint and model are usable
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if !(self.api_url.starts_with("http://")
          || self.api_url.starts_with("https://"))
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("api_url must be http(s): {}", self.api_url)
            ));
        }
        if self.model.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
