//! # Greeting Watcher
//!
//! Watches the greeting contract for `NewGreeting` events through a
//! read-only JSON-RPC provider and delivers them over a bounded channel.
//!
//! One scoped acquisition per page: [`GreetingWatcher::subscribe`] takes
//! the watcher by value, starts a single polling task, and returns the
//! event feed together with a [`WatcherHandle`] whose `shutdown` tears
//! the subscription down. Each poll scans a bounded block range ending
//! at the current head and the cursor moves past that range once its
//! logs have been forwarded, so delivery is at-most-once per observed
//! log. Undecodable log entries are skipped, not fatal.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use sha3::{Digest, Keccak256};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use url::Url;

use crate::rpc;
use crate::ClientError;

/// Event signature of the greeting contract.
const NEW_GREETING_SIGNATURE: &str = "NewGreeting(bytes32)";

/// Capacity of the event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Topic hash identifying `NewGreeting` logs.
pub fn new_greeting_topic() -> String {
    let digest = Keccak256::digest(NEW_GREETING_SIGNATURE.as_bytes());
    rpc::to_hex(&digest)
}

/// A decoded `NewGreeting` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingEvent {
    /// The greeting string carried by the event.
    pub greeting: String,
}

impl GreetingEvent {
    /// The text the page displays for this event.
    pub fn display_text(&self) -> String {
        format!("New Greeting Detected: {}", self.greeting)
    }
}

/// Receiving side of the event subscription.
#[derive(Debug)]
pub struct GreetingFeed {
    rx: mpsc::Receiver<GreetingEvent>,
}

impl GreetingFeed {
    /// Await the next event. Returns `None` once the watcher shuts down.
    pub async fn recv(&mut self) -> Option<GreetingEvent> {
        self.rx.recv().await
    }
}

/// Handle owning the polling task.
#[derive(Debug)]
pub struct WatcherHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    /// Stop the polling task and wait for it to finish.
    pub async fn shutdown(self) {
        // Receiver dropping is also a stop signal; ignore send failure.
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Poller for `NewGreeting` events on a fixed contract.
#[derive(Debug)]
pub struct GreetingWatcher {
    http: reqwest::Client,
    rpc_url: Url,
    contract_address: String,
    poll_interval: Duration,
}

#[derive(Deserialize)]
struct LogEntry {
    data: String,
}

impl GreetingWatcher {
    /// Create a watcher for the given contract.
    pub fn new(
        http: reqwest::Client,
        rpc_url: Url,
        contract_address: String,
        poll_interval: Duration,
    ) -> Self {
        Self {
            http,
            rpc_url,
            contract_address,
            poll_interval,
        }
    }

    /// Start the subscription. Events arriving after the current block
    /// are decoded and delivered in order.
    pub async fn subscribe(self) -> Result<(GreetingFeed, WatcherHandle), ClientError> {
        let mut cursor = self.head_block().await?;

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.poll_interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        match self.poll_once(cursor).await {
                            Ok((events, next_cursor)) => {
                                for event in events {
                                    if tx.send(event).await.is_err() {
                                        // Feed dropped; nothing left to deliver to.
                                        return;
                                    }
                                }
                                cursor = next_cursor;
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "greeting poll failed");
                            }
                        }
                    }
                }
            }
        });

        Ok((
            GreetingFeed { rx },
            WatcherHandle {
                shutdown: shutdown_tx,
                task,
            },
        ))
    }

    /// The current head block number.
    async fn head_block(&self) -> Result<u64, ClientError> {
        let head = rpc::call(&self.http, &self.rpc_url, "eth_blockNumber", json!([]))
            .await
            .map_err(|e| ClientError::BadResponse(e.to_string()))?;
        let head: String = serde_json::from_value(head)
            .map_err(|e| ClientError::BadResponse(format!("malformed block number: {e}")))?;
        rpc::from_hex_quantity(&head).map_err(ClientError::BadResponse)
    }

    /// Fetch logs in `from_block..=head`. Returns the decoded events and
    /// the next cursor position, one past the polled range. Entries that
    /// fail to decode are skipped so a single bad log cannot stall the
    /// cursor.
    async fn poll_once(&self, from_block: u64) -> Result<(Vec<GreetingEvent>, u64), ClientError> {
        let head = self.head_block().await?;
        if head < from_block {
            return Ok((Vec::new(), from_block));
        }

        let filter = json!([{
            "fromBlock": format!("{:#x}", from_block),
            "toBlock": format!("{:#x}", head),
            "address": self.contract_address,
            "topics": [new_greeting_topic()],
        }]);
        let result = rpc::call(&self.http, &self.rpc_url, "eth_getLogs", filter)
            .await
            .map_err(|e| ClientError::BadResponse(e.to_string()))?;
        let logs: Vec<LogEntry> = serde_json::from_value(result)
            .map_err(|e| ClientError::BadResponse(format!("malformed log list: {e}")))?;

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            match decode_bytes32_string(&log.data) {
                Ok(greeting) => events.push(GreetingEvent { greeting }),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping undecodable greeting log");
                }
            }
        }
        Ok((events, head + 1))
    }
}

/// Decode a fixed-length (bytes32) encoded string: the payload is padded
/// with trailing NULs to 32 bytes.
pub fn decode_bytes32_string(data: &str) -> Result<String, String> {
    let bytes = rpc::from_hex(data)?;
    if bytes.len() < 32 {
        return Err(format!("expected 32 bytes of event data, got {}", bytes.len()));
    }
    let word = &bytes[..32];
    let end = word.iter().position(|b| *b == 0).unwrap_or(32);
    String::from_utf8(word[..end].to_vec()).map_err(|e| format!("invalid utf-8: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bytes32_hex(s: &str) -> String {
        let mut word = [0u8; 32];
        word[..s.len()].copy_from_slice(s.as_bytes());
        rpc::to_hex(&word)
    }

    #[test]
    fn topic_is_a_32_byte_hex_string() {
        let topic = new_greeting_topic();
        assert!(topic.starts_with("0x"));
        assert_eq!(topic.len(), 66);
    }

    #[test]
    fn decodes_padded_string() {
        assert_eq!(decode_bytes32_string(&bytes32_hex("hi")).unwrap(), "hi");
    }

    #[test]
    fn decodes_full_width_string() {
        let s = "abcdefghijklmnopqrstuvwxyz123456";
        assert_eq!(decode_bytes32_string(&bytes32_hex(s)).unwrap(), s);
    }

    #[test]
    fn rejects_short_data() {
        assert!(decode_bytes32_string("0x6869").is_err());
    }

    #[test]
    fn rejects_non_ascii_data() {
        assert!(decode_bytes32_string("0x\u{20a0}aaaaaaaaaaaa").is_err());
    }

    #[test]
    fn event_display_text() {
        let event = GreetingEvent {
            greeting: "hi".to_string(),
        };
        assert_eq!(event.display_text(), "New Greeting Detected: hi");
    }

    #[tokio::test]
    async fn subscription_delivers_decoded_events() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"method": "eth_blockNumber"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1, "result": "0x10"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"method": "eth_getLogs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1,
                "result": [{"data": bytes32_hex("hi"), "blockNumber": "0x11"}]
            })))
            .mount(&server)
            .await;

        let watcher = GreetingWatcher::new(
            reqwest::Client::new(),
            Url::parse(&server.uri()).unwrap(),
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".to_string(),
            Duration::from_millis(10),
        );
        let (mut feed, handle) = watcher.subscribe().await.unwrap();

        let event = feed.recv().await.unwrap();
        assert_eq!(event.display_text(), "New Greeting Detected: hi");

        handle.shutdown().await;
    }

    async fn watcher_against(server: &MockServer) -> GreetingWatcher {
        GreetingWatcher::new(
            reqwest::Client::new(),
            Url::parse(&server.uri()).unwrap(),
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".to_string(),
            Duration::from_millis(10),
        )
    }

    async fn mount_head(server: &MockServer, head: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"method": "eth_blockNumber"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1, "result": head
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn undecodable_log_is_skipped_and_the_cursor_still_advances() {
        let server = MockServer::start().await;
        mount_head(&server, "0x11").await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"method": "eth_getLogs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1,
                "result": [{"data": "0x6869"}, {"data": bytes32_hex("hi")}]
            })))
            .mount(&server)
            .await;

        let watcher = watcher_against(&server).await;
        let (events, next_cursor) = watcher.poll_once(0x10).await.unwrap();
        assert_eq!(
            events,
            vec![GreetingEvent {
                greeting: "hi".to_string()
            }]
        );
        assert_eq!(next_cursor, 0x12);
    }

    #[tokio::test]
    async fn cursor_moves_past_the_polled_range_so_logs_are_not_refetched() {
        let server = MockServer::start().await;
        mount_head(&server, "0x15").await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({"method": "eth_getLogs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0", "id": 1,
                "result": [{"data": bytes32_hex("hi")}]
            })))
            .mount(&server)
            .await;

        let watcher = watcher_against(&server).await;
        let (_, next_cursor) = watcher.poll_once(0x10).await.unwrap();
        assert_eq!(next_cursor, 0x16);

        // With the cursor ahead of the head, nothing is re-fetched.
        let (events, unchanged) = watcher.poll_once(next_cursor).await.unwrap();
        assert!(events.is_empty());
        assert_eq!(unchanged, next_cursor);
    }

    #[tokio::test]
    async fn unreachable_provider_fails_subscribe() {
        let watcher = GreetingWatcher::new(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:1").unwrap(),
            "0x0".to_string(),
            Duration::from_millis(10),
        );
        assert!(watcher.subscribe().await.is_err());
    }
}
