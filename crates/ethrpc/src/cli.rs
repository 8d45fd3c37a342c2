use clap::{Parser, Subcommand};
use ethrpc_core::BlockId;

/// ethrpc — query balances and nonces and submit signed transactions
/// against an Ethereum JSON-RPC endpoint.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Node JSON-RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:8545", env = "ETHRPC_URL")]
    pub rpc_url: String,

    /// RPC username (optional; not needed for token-in-URL providers).
    #[arg(long, env = "ETHRPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password (optional; not needed for token-in-URL providers).
    #[arg(long, env = "ETHRPC_PASS")]
    pub rpc_pass: Option<String>,

    /// Maximum outbound requests per second.
    #[arg(long)]
    pub requests_per_second: Option<u32>,

    /// Whole-request timeout in seconds. The library itself applies none.
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print an account balance in wei, as the node's hex string.
    Balance {
        address: String,

        /// Block tag or number.
        #[arg(long, default_value = "latest")]
        block: BlockId,
    },

    /// Print an account's transaction count.
    Nonce {
        address: String,

        /// Block tag or number.
        #[arg(long, default_value = "pending")]
        block: BlockId,

        /// Fail instead of printing 0 when the node returns an unparseable count.
        #[arg(long)]
        strict: bool,
    },

    /// Submit an already signed, hex-encoded transaction and print its hash.
    SendRaw { signed_tx_hex: String },
}
