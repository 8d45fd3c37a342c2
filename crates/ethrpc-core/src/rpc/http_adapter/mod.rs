//! Native JSON-RPC client for Ethereum compatible endpoints.
//!
//! Implements [`EthRpc`](super::EthRpc) over JSON-RPC 2.0, with a pluggable
//! HTTP transport, optional request rate limiting and basic auth.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::{HttpRpcClient, HttpRpcClientBuilder};
pub use parsing::{parse_hex_u64, HexError};
