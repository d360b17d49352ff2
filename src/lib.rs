pub mod error;
pub mod config;
pub mod request;
pub mod normalize;
pub mod transport;
pub mod assistant;
pub mod client;

pub use assistant::{Assistant, NormalizedResult};
pub use client::AssistBackend;
pub use config::AssistConfig;
pub use error::Error;
pub use request::{
  ChatMessage, CompletionRequest, Purpose, Role, WritingMode,
};

/*

noteai is the AI layer of a Markdown note-taking app: LaTeX formula
generation, writing suggestions and a chat assistant, all served by one
OpenAI-compatible chat-completion endpoint whose reply shape we do not
control.

noteai/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and the channel API
│   ├── error.rs        # Error type
│   ├── config.rs       # Endpoint configuration (env / JSON)
│   ├── request.rs      # Request types, prompts, message list
│   ├── normalize.rs    # Best-effort text extraction
│   ├── transport/      # POST seam and the reqwest implementation
│   ├── assistant.rs    # Build, send, normalize
│   └── client.rs       # Backend task owning an Assistant
└── tests/

*/

/// NOTEAI API INTERFACE:

// ===== Complete =====

/// Completions never fail at the channel level; errors are folded
/// into the result's `failure_reason`.
pub type CompleteReply = crate::assistant::NormalizedResult;
pub type CompleteReplySender
  = tokio::sync::mpsc::UnboundedSender<CompleteReply>;

pub struct CompleteArgs
{   pub request: crate::request::CompletionRequest
  , pub reply: CompleteReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== AssistHand (sender side) =====

pub struct AssistHand
{   pub complete_tx
      : tokio::sync::mpsc::UnboundedSender<CompleteArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== AssistFoot (receiver side) =====

pub struct AssistFoot
{   pub complete_rx
      : tokio::sync::mpsc::UnboundedReceiver<CompleteArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
