//! Minimal typed client for an Ethereum node's JSON-RPC 2.0 interface.
//!
//! ```no_run
//! use ethrpc_core::rpc::{EthRpc, HttpRpcClient};
//! use ethrpc_core::BlockId;
//!
//! # async fn run() -> Result<(), ethrpc_core::CoreError> {
//! let client = HttpRpcClient::new("http://127.0.0.1:8545")?;
//! let nonce = client
//!     .get_transaction_count("0x8ffcf7674ed27c7949ceda9a0bd6799fe74acf47", &BlockId::Pending)
//!     .await?;
//! # let _ = nonce;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rpc;
pub mod types;

pub use error::{CoreError, RpcError};
pub use types::BlockId;
