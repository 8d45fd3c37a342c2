use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{CoreError, RpcError};
use crate::types::BlockId;

use super::super::transport::{HttpSender, ReqwestSender};
use super::super::EthRpc;
use super::connection::{parse_endpoint, resolve_auth};
use super::parsing::{decode_string_result, parse_hex_u64};
use super::protocol::{
    id_matches, parse_jsonrpc_error, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION,
};

const GET_BALANCE: &str = "eth_getBalance";
const GET_TRANSACTION_COUNT: &str = "eth_getTransactionCount";
const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Ethereum JSON-RPC client over HTTP(S).
///
/// One client per endpoint, reused across calls. Calls carry no per-call
/// state beyond a request id, so a shared `&HttpRpcClient` may be used from
/// many tasks at once as long as the installed [`HttpSender`] is itself safe
/// for concurrent use (the default `reqwest` sender is).
pub struct HttpRpcClient {
    sender: Arc<dyn HttpSender>,
    url: String,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    /// Create a client for an `http://` or `https://` endpoint using the
    /// default `reqwest` transport, which imposes no timeout.
    pub fn new(endpoint: &str) -> Result<Self, CoreError> {
        Self::builder(endpoint).build()
    }

    pub fn builder(endpoint: &str) -> HttpRpcClientBuilder {
        HttpRpcClientBuilder {
            endpoint: endpoint.to_owned(),
            user: None,
            pass: None,
            timeouts: None,
            requests_per_second: None,
            sender: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Route all subsequent calls through `sender`.
    ///
    /// Requires `&mut self`, so it cannot overlap with an in-flight call on
    /// this client. Credentials configured through the builder belong to the
    /// replaced default sender and do not carry over.
    pub fn set_http_sender(&mut self, sender: Arc<dyn HttpSender>) {
        debug!(endpoint = %self.url, "replacing http sender");
        self.sender = sender;
    }

    /// Shorthand for [`set_http_sender`](Self::set_http_sender) with a
    /// caller-built `reqwest::Client`.
    pub fn use_reqwest_client(&mut self, client: reqwest::Client) {
        self.set_http_sender(Arc::new(ReqwestSender::new(client)));
    }

    fn reserve_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Perform one JSON-RPC call and return the raw `result`.
    ///
    /// `params` should serialize to a JSON array (slices, `Vec`s and tuples
    /// do). An error object in the response takes precedence over any
    /// `result`; an absent `result` is returned as `null`.
    pub async fn call<P>(&self, method: &str, params: &P) -> Result<serde_json::Value, CoreError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let id = self.reserve_request_id();
        let req = JsonRpcRequest {
            id,
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        };
        let body = serde_json::to_vec(&req).map_err(RpcError::Encoding)?;
        debug!(
            rpc.id = id,
            rpc.method = method,
            body_len = body.len(),
            "rpc call"
        );
        trace!(
            rpc.id = id,
            rpc.method = method,
            body = %String::from_utf8_lossy(&body),
            "rpc request body"
        );

        self.wait_for_rate_limit().await;
        let body = self
            .sender
            .post_json(&self.url, body)
            .await
            .map_err(RpcError::Transport)?;
        debug!(rpc.id = id, rpc.method = method, body_len = body.len(), "rpc response");

        let decoded: JsonRpcResponse =
            serde_json::from_slice(&body).map_err(|source| RpcError::Decoding {
                source,
                body: String::from_utf8_lossy(&body).into_owned(),
            })?;
        if !id_matches(id, &decoded.id) {
            debug!(
                rpc.id = id,
                rpc.method = method,
                rpc.echoed_id = %decoded.id,
                rpc.version = ?decoded.jsonrpc,
                "response id does not match request id"
            );
        }

        if let Some(err) = decoded.error {
            return Err(parse_jsonrpc_error(err));
        }

        Ok(decoded.result.unwrap_or(serde_json::Value::Null))
    }

    async fn fetch_transaction_count(
        &self,
        address: &str,
        block: &BlockId,
    ) -> Result<String, CoreError> {
        let raw = self
            .call(GET_TRANSACTION_COUNT, &(address, block))
            .await?;
        decode_string_result(GET_TRANSACTION_COUNT, raw)
    }
}

#[async_trait]
impl EthRpc for HttpRpcClient {
    async fn get_balance(&self, address: &str, block: &BlockId) -> Result<String, CoreError> {
        let raw = self.call(GET_BALANCE, &(address, block)).await?;
        decode_string_result(GET_BALANCE, raw)
    }

    async fn get_transaction_count(
        &self,
        address: &str,
        block: &BlockId,
    ) -> Result<u64, CoreError> {
        let count_hex = self.fetch_transaction_count(address, block).await?;
        Ok(decode_count_lenient(address, &count_hex))
    }

    async fn get_transaction_count_strict(
        &self,
        address: &str,
        block: &BlockId,
    ) -> Result<u64, CoreError> {
        let count_hex = self.fetch_transaction_count(address, block).await?;
        parse_hex_u64(&count_hex).map_err(|source| CoreError::UnparseableCount {
            raw: count_hex,
            source,
        })
    }

    async fn send_raw_transaction(&self, signed_tx_hex: &str) -> Result<String, CoreError> {
        let raw = self.call(SEND_RAW_TRANSACTION, &[signed_tx_hex]).await?;
        decode_string_result(SEND_RAW_TRANSACTION, raw)
    }
}

// ==============================================================================
// Lenient Count Decoding
// ==============================================================================

/// Decode a transaction count, degrading to zero when the node returns a
/// string that is not a valid hex quantity.
///
/// Zero is indistinguishable from "no transactions yet", so callers that
/// derive nonces from this value can reuse a nonce. It is unclear whether
/// the fallback is wanted or an accident; it is kept for compatibility and
/// every occurrence is logged.
fn decode_count_lenient(address: &str, count_hex: &str) -> u64 {
    match parse_hex_u64(count_hex) {
        Ok(count) => count,
        Err(error) => {
            warn!(
                address,
                raw = count_hex,
                %error,
                "unparseable transaction count; treating as 0"
            );
            0
        }
    }
}

// ==============================================================================
// Builder
// ==============================================================================

pub struct HttpRpcClientBuilder {
    endpoint: String,
    user: Option<String>,
    pass: Option<String>,
    timeouts: Option<(Duration, Duration)>,
    requests_per_second: Option<u32>,
    sender: Option<Arc<dyn HttpSender>>,
}

impl HttpRpcClientBuilder {
    /// HTTP basic auth for the default transport. Both halves are required.
    pub fn basic_auth(mut self, user: Option<&str>, pass: Option<&str>) -> Self {
        self.user = user.map(str::to_owned);
        self.pass = pass.map(str::to_owned);
        self
    }

    /// Timeouts for the default transport. Without this call the default
    /// transport never times out. Ignored when a custom sender is installed.
    pub fn timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.timeouts = Some((connect, request));
        self
    }

    /// Throttle outbound requests to at most `limit` per second. Calls wait
    /// for a permit; nothing is dropped or retried.
    pub fn requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = Some(limit);
        self
    }

    pub fn http_sender(mut self, sender: Arc<dyn HttpSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn build(self) -> Result<HttpRpcClient, CoreError> {
        let url = parse_endpoint(&self.endpoint)?;
        let auth = resolve_auth(self.user.as_deref(), self.pass.as_deref())?;

        let limiter = match self.requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::InvalidConfig("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        let sender: Arc<dyn HttpSender> = match (self.sender, auth) {
            (Some(_), Some(_)) => {
                return Err(CoreError::InvalidConfig(
                    "basic auth applies to the default transport only".to_owned(),
                ));
            }
            (Some(sender), None) => sender,
            (None, auth) => {
                let mut sender = match self.timeouts {
                    Some((connect, request)) => ReqwestSender::with_timeouts(connect, request)?,
                    None => ReqwestSender::pooled()?,
                };
                if let Some((user, pass)) = auth {
                    sender = sender.with_basic_auth(user, pass);
                }
                Arc::new(sender)
            }
        };

        Ok(HttpRpcClient {
            sender,
            url,
            limiter,
            next_id: AtomicU64::new(1),
        })
    }
}
