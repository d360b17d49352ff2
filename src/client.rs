use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::AssistFoot;

/// Public API for the assistant backend - owns the task
pub struct AssistBackend
{   hand: crate::AssistHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl AssistBackend
{   /// Create and spawn a backend talking HTTP
    /// Returns immediately - spawns background task
    pub fn new(
      config: crate::config::AssistConfig
    ) -> Result<Self, crate::error::Error>
    {   let assistant
          = crate::assistant::Assistant::from_config(config)?;
        Ok(Self::spawn(assistant))
    }

    /// Create and spawn a backend over any transport
    pub fn with_transport<T: crate::transport::Transport>(
      config: crate::config::AssistConfig
    , transport: T
    ) -> Self
    {   Self::spawn(
          crate::assistant::Assistant::with_transport(config, transport)
        )
    }

    fn spawn<T: crate::transport::Transport>(
      assistant: crate::assistant::Assistant<T>
    ) -> Self
    {   debug!("Creating AssistBackend with task ownership");

        let (complete_tx, complete_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::AssistHand
        {   complete_tx
          , kill_process_tx
        };

        let foot = crate::AssistFoot
        {   complete_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, assistant).await
        });

        AssistBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a completion - returns almost immediately
    pub async fn complete(
      &self
    , request: crate::request::CompletionRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::CompleteReply>,
        crate::error::Error
      >
    {   debug!("complete queuing {:?} request", request.purpose);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::CompleteArgs
        {   request
          , reply: reply_tx
        };

        self.hand.complete_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::Other(
              "Backend disconnected".to_string()
            )
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    ///
    /// Requests already in flight keep running to completion.
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down AssistBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown timeout");
            Err(crate::error::Error::Timeout)
        }
    }
}

/// Main backend event loop
///
/// The select only routes. Each completion gets its own task, so
/// concurrent requests neither queue behind nor wait on each other.
async fn run_backend_loop<T: crate::transport::Transport>(
  foot: crate::AssistFoot
, assistant: crate::assistant::Assistant<T>
)
{   debug!("Starting AssistBackend event loop");
    let AssistFoot
    {   mut complete_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = complete_rx.recv() => {
          debug!("Received Complete: {:?}", cmd.request.purpose);
          let assistant = assistant.clone();
          tokio::spawn(async move {
            let result = assistant.complete(cmd.request).await;
            let _ = cmd.reply.send(result);
          });
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("AssistBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
