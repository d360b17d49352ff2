//! Request types and outgoing message construction

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Prefix marking the context message as background material
pub const CONTEXT_PREFIX: &str = "Context: ";

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

/// One role-tagged message; order in a conversation is chronological
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn new(role: Role, content: impl Into<String>) -> Self
    {   ChatMessage
        {   role
          , content: content.into()
        }
    }

    pub fn system(content: impl Into<String>) -> Self
    {   Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self
    {   Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {   Self::new(Role::Assistant, content)
    }
}

/// What the call is for; selects the system prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose
{   /// Description in, LaTeX out
    Formula
  , /// Rewrite a passage of a note
    Writing
  , /// Free-form assistant chat
    General
}

/// How a writing suggestion should transform the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingMode
{   #[default]
    Improve
  , Expand
  , Summarize
  , Explain
}

impl WritingMode
{   /// Instruction placed ahead of the user's text
    pub fn instruction(&self) -> &'static str
    {   match self
        {   WritingMode::Improve =>
              "Rewrite the following text so it is clearer, more \
               professional and easier to read. Output only the \
               rewritten text, without notes or suggestions:"
          , WritingMode::Expand =>
              "Expand the following text with more detail and \
               explanation. Output only the expanded text, without \
               notes or suggestions:"
          , WritingMode::Summarize =>
              "Summarize the following text, keeping the key points. \
               Output only the summary, without notes or suggestions:"
          , WritingMode::Explain =>
              "Explain the following text so it is easier to \
               understand. Output only the explanation, without notes \
               or suggestions:"
        }
    }
}

/// A single completion call, built per request and then discarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest
{   pub purpose: Purpose
  , pub prompt_text: String
  , pub context_text: Option<String>
  , pub history: Vec<ChatMessage>
}

impl CompletionRequest
{   /// Turn a plain-language description into LaTeX
    pub fn formula(description: &str) -> Self
    {   CompletionRequest
        {   purpose: Purpose::Formula
          , prompt_text: format!(
              "Convert the following description into a LaTeX \
               formula: {}",
              description
            )
          , context_text: None
          , history: vec![]
        }
    }

    /// Rewrite `text` according to `mode`, optionally with note context
    pub fn writing(
      text: &str
    , context: Option<String>
    , mode: WritingMode
    ) -> Self
    {   CompletionRequest
        {   purpose: Purpose::Writing
          , prompt_text: format!("{}\n\n{}", mode.instruction(), text)
          , context_text: context
          , history: vec![]
        }
    }

    /// Chat turn with optional context and prior conversation
    pub fn chat(
      prompt: impl Into<String>
    , context: Option<String>
    , history: Vec<ChatMessage>
    ) -> Self
    {   CompletionRequest
        {   purpose: Purpose::General
          , prompt_text: prompt.into()
          , context_text: context
          , history
        }
    }

    /// Single general question
    pub fn general(prompt: impl Into<String>) -> Self
    {   Self::chat(prompt, None, vec![])
    }
}

/// System prompt for a call purpose
pub fn system_prompt(purpose: Purpose, language: &str) -> String
{   match purpose
    {   Purpose::Formula =>
          "You are a math formula assistant. The user describes a \
           formula and you return the matching LaTeX code. Return only \
           the LaTeX code, with no explanation, no Markdown and no extra \
           text. Do not wrap block formulas in $$ delimiters."
            .to_string()
      , Purpose::Writing => format!(
          "You are a writing assistant. The user provides a passage and \
           you return the rewritten passage itself, not advice about it. \
           Output only the rewritten text with no commentary. Respond in \
           {}, professionally and concisely.",
          language
        )
      , Purpose::General => format!(
          "You are an AI assistant helping the user solve problems. \
           Respond in {}, professionally, helpfully and practically.",
          language
        )
    }
}

/// Outgoing message list: system, context, history, prompt
pub fn build_messages(
  request: &CompletionRequest
, language: &str
) -> Vec<ChatMessage>
{   let mut messages = Vec::with_capacity(request.history.len() + 3);
    messages.push(ChatMessage::system(
      system_prompt(request.purpose, language)
    ));
    if let Some(context) = request.context_text
      .as_deref()
      .filter(|c| !c.is_empty())
    {   messages.push(ChatMessage::user(
          format!("{}{}", CONTEXT_PREFIX, context)
        ));
    }
    messages.extend(request.history.iter().cloned());
    messages.push(ChatMessage::user(request.prompt_text.clone()));
    messages
}

/// JSON body POSTed to the completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionBody
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f32
}

impl ChatCompletionBody
{   pub fn new(model: &str, messages: Vec<ChatMessage>) -> Self
    {   ChatCompletionBody
        {   model: model.to_string()
          , messages
          , temperature: TEMPERATURE
        }
    }
}
