//! Ethereum node RPC abstraction layer.
//!
//! Defines the [`EthRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) over a replaceable [`HttpSender`]
//! transport, plus a scripted test sender (`mock::MockSender`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod transport;

pub use http_adapter::{parse_hex_u64, HexError, HttpRpcClient, HttpRpcClientBuilder};
pub use transport::{HttpSender, ReqwestSender, TransportError};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::BlockId;

/// The three node RPC methods this crate exposes.
///
/// Implementations are expected to handle transport, envelope framing and
/// result decoding internally. Node-side rejections (malformed addresses,
/// bad transaction payloads) surface as `RpcError::ServerError` with the
/// node's message untouched, so callers can match on its wording.
#[async_trait]
pub trait EthRpc: Send + Sync {
    /// `eth_getBalance`: the balance in wei as the node's hex string,
    /// returned verbatim. Balances routinely exceed `u64`, so no numeric
    /// conversion is attempted.
    async fn get_balance(&self, address: &str, block: &BlockId) -> Result<String, CoreError>;

    /// `eth_getTransactionCount`, decoded to a `u64`.
    ///
    /// A string result that is not a valid hex quantity decodes to `0`
    /// (logged at `warn`). Use [`EthRpc::get_transaction_count_strict`] to
    /// get an error instead.
    async fn get_transaction_count(&self, address: &str, block: &BlockId)
        -> Result<u64, CoreError>;

    /// Like [`EthRpc::get_transaction_count`], but an unparseable count is
    /// reported as `CoreError::UnparseableCount`.
    async fn get_transaction_count_strict(
        &self,
        address: &str,
        block: &BlockId,
    ) -> Result<u64, CoreError>;

    /// `eth_sendRawTransaction`: submit an already signed transaction and
    /// return its hash verbatim. The payload is not validated locally.
    async fn send_raw_transaction(&self, signed_tx_hex: &str) -> Result<String, CoreError>;
}
