use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::transport::{HttpSender, TransportError};

/// A scripted [`HttpSender`] for testing. Replays canned bodies (or
/// failures) in order and records every request it receives.
pub struct MockSender {
    replies: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MockSender {
    pub fn builder() -> MockSenderBuilder {
        MockSenderBuilder {
            replies: VecDeque::new(),
        }
    }

    /// Requests seen so far as `(url, decoded body)` pairs.
    pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }
}

pub struct MockSenderBuilder {
    replies: VecDeque<Result<Vec<u8>, String>>,
}

impl MockSenderBuilder {
    /// Reply with `{"jsonrpc":"2.0","id":1,"result":<result>}`.
    pub fn with_result(self, result: serde_json::Value) -> Self {
        self.with_body(
            serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string(),
        )
    }

    /// Reply with a JSON-RPC error object.
    pub fn with_error(self, code: i64, message: &str) -> Self {
        self.with_body(
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": code, "message": message},
            })
            .to_string(),
        )
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.replies.push_back(Ok(body.into().into_bytes()));
        self
    }

    pub fn with_transport_failure(mut self, message: &str) -> Self {
        self.replies.push_back(Err(message.to_owned()));
        self
    }

    pub fn build(self) -> MockSender {
        MockSender {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpSender for MockSender {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let decoded = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push((url.to_owned(), decoded));

        match self.replies.lock().expect("mock lock poisoned").pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(TransportError::Other(message.into())),
            None => Err(TransportError::Other("mock sender has no replies left".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_and_records_requests() {
        let sender = MockSender::builder()
            .with_result(serde_json::json!("0x1"))
            .with_transport_failure("connection refused")
            .build();

        let first = sender
            .post_json("http://node", br#"{"method":"a"}"#.to_vec())
            .await
            .expect("first reply is a body");
        assert!(String::from_utf8(first).unwrap().contains("0x1"));

        let second = sender
            .post_json("http://node", br#"{"method":"b"}"#.to_vec())
            .await
            .expect_err("second reply is a failure");
        assert!(second.to_string().contains("connection refused"));

        assert!(sender.post_json("http://node", Vec::new()).await.is_err());

        let seen = sender.requests();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].1["method"], "a");
        assert_eq!(seen[1].1["method"], "b");
    }
}
