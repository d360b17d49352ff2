#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::future::Future;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use noteai::transport::{Transport, TransportRequest, TransportResponse};

/// Route log output through the test harness
pub fn init_logging()
{   let _ = env_logger::builder().is_test(true).try_init();
}

/// Transport that records requests and returns a canned reply
#[derive(Clone)]
pub struct FakeTransport
{   reply: Result<TransportResponse, noteai::Error>
  , pub seen: Arc<Mutex<Vec<TransportRequest>>>
}

impl FakeTransport
{   pub fn ok(status: u16, body: &str) -> Self
    {   FakeTransport
        {   reply: Ok(TransportResponse
            {   status
              , body: body.to_string()
            })
          , seen: Arc::new(Mutex::new(vec![]))
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self
    {   Self::ok(status, &body.to_string())
    }

    pub fn failing(message: &str) -> Self
    {   FakeTransport
        {   reply: Err(noteai::Error::TransportError(
              message.to_string()
            ))
          , seen: Arc::new(Mutex::new(vec![]))
        }
    }

    pub fn requests(&self) -> Vec<TransportRequest>
    {   self.seen.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport
{   fn post(
      &self
    , request: TransportRequest
    ) -> impl Future<
        Output = Result<TransportResponse, noteai::Error>
      > + Send
    {   self.seen.lock().unwrap().push(request);
        let reply = self.reply.clone();
        async move { reply }
    }
}

/// Captured HTTP request seen by the mock server
#[derive(Debug, Clone)]
pub struct CapturedRequest
{   pub head: String
  , pub body: String
}

/// One-shot HTTP server on localhost
///
/// Answers the first connection with `status` and `body`, then hands
/// back what the client sent.
pub async fn serve_once(
  status: u16
, body: &str
) -> (String, tokio::task::JoinHandle<CapturedRequest>)
{   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!(
      "http://{}/v1/chat/completions",
      listener.local_addr().unwrap()
    );
    let body = body.to_string();

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut buf = Vec::new();
      let mut chunk = [0u8; 4096];

      let head_end = loop
      {   let n = socket.read(&mut chunk).await.unwrap();
          assert!(n > 0, "client closed before sending headers");
          buf.extend_from_slice(&chunk[..n]);
          if let Some(pos) = find(&buf, b"\r\n\r\n")
          {   break pos + 4;
          }
      };

      let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
      let content_length = head.lines()
        .find_map(|line| {
          let (name, value) = line.split_once(':')?;
          if name.trim().eq_ignore_ascii_case("content-length")
          {   value.trim().parse::<usize>().ok()
          } else
          {   None
          }
        })
        .unwrap_or(0);

      while buf.len() < head_end + content_length
      {   let n = socket.read(&mut chunk).await.unwrap();
          if n == 0
          {   break;
          }
          buf.extend_from_slice(&chunk[..n]);
      }
      let request_body = String::from_utf8_lossy(
        &buf[head_end..]
      ).to_string();

      let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
      );
      socket.write_all(response.as_bytes()).await.unwrap();
      socket.shutdown().await.unwrap();

      CapturedRequest
      {   head
        , body: request_body
      }
    });

    (url, handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize>
{   haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str
{   match status
    {   200 => "OK"
      , 401 => "Unauthorized"
      , 500 => "Internal Server Error"
      , _ => "Status"
    }
}
