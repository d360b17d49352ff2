//! Best-effort text extraction from completion responses
//!
//! Providers disagree on response shape, so extraction runs a short
//! list of strategies and keeps the first usable string:
//!
//! 1. `choices[0]` in its OpenAI-style forms
//! 2. well-known top-level fields
//! 3. the response itself when it is a bare string
//! 4. a depth-bounded search of the whole value
//!
//! Everything here is pure; the same value always yields the same text.

use serde_json::Value;
use log::{trace, warn};

/// Keys probed, in order, when coercing an object to text
pub const COERCE_KEYS: [&str; 7] =
  ["content", "message", "text", "response", "data", "result", "output"];

/// Top-level keys tried by the field extractor
pub const TOP_LEVEL_KEYS: [&str; 6] =
  ["content", "message", "text", "response", "data", "result"];

/// Keys probed first by the recursive search
pub const SEARCH_KEYS: [&str; 8] =
  [ "content", "message", "text", "response"
  , "data", "result", "output", "body"
  ];

/// Values nested deeper than this are never inspected
pub const MAX_SEARCH_DEPTH: usize = 5;

/// A single extraction strategy
pub type Strategy = fn(&Value) -> Option<String>;

/// Named field strategies, tried before the recursive search
pub const FIELD_STRATEGIES: [(&str, Strategy); 3] =
  [ ("choices", from_choices)
  , ("top-level field", from_top_level_fields)
  , ("bare string", from_bare_string)
  ];

/// Convert any JSON value to display text. Never fails.
pub fn coerce_to_string(value: &Value) -> String
{   match value
    {   Value::Null => String::new()
      , Value::String(s) => s.clone()
      , Value::Number(n) => n.to_string()
      , Value::Bool(b) => b.to_string()
      , Value::Array(items) => {
          items.iter()
            .map(coerce_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
        }
      , Value::Object(map) => {
          for key in COERCE_KEYS
          {   match map.get(key)
              {   None | Some(Value::Null) => continue
                , Some(inner) => {
                    let text = coerce_to_string(inner);
                    if !text.is_empty()
                    {   return text;
                    }
                  }
              }
          }
          format!("{:#}", value)
        }
    }
}

/// Text that can be handed back to the caller
///
/// Blank strings and the serializations of empty containers do not count.
pub fn is_usable(text: &str) -> bool
{   let trimmed = text.trim();
    !trimmed.is_empty() && trimmed != "{}" && trimmed != "[]"
}

fn usable(text: String) -> Option<String>
{   if is_usable(&text)
    {   Some(text)
    } else
    {   None
    }
}

/// Loose truthiness: present and not null, false, zero or ""
fn truthy(value: Option<&Value>) -> Option<&Value>
{   value.filter(|v| match v
    {   Value::Null => false
      , Value::Bool(b) => *b
      , Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0)
      , Value::String(s) => !s.is_empty()
      , Value::Array(_) | Value::Object(_) => true
    })
}

/// `choices[0]` with `message.content`, `message.text`, `text` or `content`
pub fn from_choices(response: &Value) -> Option<String>
{   let choice = response.get("choices")?
      .as_array()?
      .first()?;

    let text = if let Some(message) = truthy(choice.get("message"))
    {   let inner = truthy(message.get("content"))
          .or_else(|| truthy(message.get("text")))
          .unwrap_or(message);
        coerce_to_string(inner)
    } else if let Some(text) = truthy(choice.get("text"))
    {   coerce_to_string(text)
    } else if let Some(content) = truthy(choice.get("content"))
    {   coerce_to_string(content)
    } else
    {   coerce_to_string(choice)
    };
    usable(text)
}

/// First present, non-null well-known top-level field
pub fn from_top_level_fields(response: &Value) -> Option<String>
{   let map = response.as_object()?;
    TOP_LEVEL_KEYS.iter()
      .filter_map(|key| map.get(*key))
      .filter(|v| !v.is_null())
      .find_map(|v| usable(coerce_to_string(v)))
}

/// The response is itself a string
pub fn from_bare_string(response: &Value) -> Option<String>
{   response.as_str()
      .map(str::to_string)
      .and_then(usable)
}

/// Run the field strategies in order
pub fn extract_known_fields(response: &Value) -> Option<String>
{   FIELD_STRATEGIES.iter().find_map(|(name, strategy)| {
      let found = strategy(response);
      if found.is_some()
      {   trace!("Extracted text via {}", name);
      }
      found
    })
}

/// Depth-bounded search for the first non-blank string
///
/// Priority keys are probed before the remaining properties, which are
/// visited in the order the endpoint sent them.
pub fn search_for_text(value: &Value) -> Option<String>
{   search_at_depth(value, 0)
}

fn search_at_depth(value: &Value, depth: usize) -> Option<String>
{   if depth > MAX_SEARCH_DEPTH
    {   return None;
    }
    match value
    {   Value::String(s) if !s.trim().is_empty() => Some(s.clone())
      , Value::Array(items) => {
          items.iter()
            .find_map(|item| search_at_depth(item, depth + 1))
        }
      , Value::Object(map) => {
          SEARCH_KEYS.iter()
            .filter_map(|key| map.get(*key))
            .find_map(|v| search_at_depth(v, depth + 1))
            .or_else(|| {
              map.values()
                .find_map(|v| search_at_depth(v, depth + 1))
            })
        }
      , _ => None
    }
}

/// Full pipeline: field strategies, then the recursive search
///
/// Returns trimmed text, or `None` when nothing usable was found.
pub fn normalize(response: &Value) -> Option<String>
{   let text = match extract_known_fields(response)
    {   Some(text) => text
      , None => {
          warn!("Unrecognized response shape, searching for text");
          search_for_text(response)?
        }
    };
    usable(text.trim().to_string())
}
