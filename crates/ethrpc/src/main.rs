mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};

use ethrpc_core::rpc::transport::DEFAULT_CONNECT_TIMEOUT;
use ethrpc_core::rpc::{EthRpc, HttpRpcClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let mut builder = HttpRpcClient::builder(&args.rpc_url)
        .basic_auth(args.rpc_user.as_deref(), args.rpc_pass.as_deref())
        .timeouts(DEFAULT_CONNECT_TIMEOUT, Duration::from_secs(args.timeout_secs));
    if let Some(limit) = args.requests_per_second {
        builder = builder.requests_per_second(limit);
    }
    let rpc = builder.build().context("configure RPC client")?;
    tracing::debug!(endpoint = rpc.endpoint(), "rpc client ready");

    let output = match args.command {
        cli::Command::Balance { address, block } => rpc
            .get_balance(&address, &block)
            .await
            .map_err(|err| rpc_failure(&args.rpc_url, "eth_getBalance", err))?,
        cli::Command::Nonce {
            address,
            block,
            strict,
        } => {
            let count = if strict {
                rpc.get_transaction_count_strict(&address, &block).await
            } else {
                rpc.get_transaction_count(&address, &block).await
            };
            count
                .map_err(|err| rpc_failure(&args.rpc_url, "eth_getTransactionCount", err))?
                .to_string()
        }
        cli::Command::SendRaw { signed_tx_hex } => {
            let hash = rpc
                .send_raw_transaction(&signed_tx_hex)
                .await
                .map_err(|err| rpc_failure(&args.rpc_url, "eth_sendRawTransaction", err))?;
            tracing::info!(tx_hash = %hash, "transaction submitted");
            hash
        }
    };

    println!("{output}");
    Ok(())
}

fn rpc_failure(rpc_url: &str, method: &str, err: ethrpc_core::CoreError) -> eyre::Report {
    let mut message = format!("{method} failed: {err}");
    if let ethrpc_core::CoreError::Rpc(ethrpc_core::RpcError::Transport(_)) = err {
        message.push_str(&format!(
            "\nhint: could not reach `{rpc_url}`; verify the URL and that the node is running"
        ));
    }
    eyre!(message)
}
