//! Agora daemon — entry point for running the voting client.

use std::sync::Arc;

use agora_client::{Client, ClientConfig, LogFormat, Notice, RunOutcome};
use agora_ledger::{RpcLedger, WsEventStream};
use agora_wallet::{RpcWallet, WalletProvider};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agora-daemon", about = "Agora proposal voting client daemon")]
struct Cli {
    /// Contract bridge endpoint for reads and writes.
    #[arg(long, env = "AGORA_RPC_URL")]
    rpc_url: Option<String>,

    /// WebSocket endpoint for the contract event subscription.
    #[arg(long, env = "AGORA_WS_URL")]
    ws_url: Option<String>,

    /// Wallet bridge endpoint for identity and chain detection.
    #[arg(long, env = "AGORA_WALLET_URL")]
    wallet_url: Option<String>,

    /// Wallet polling interval in seconds.
    #[arg(long, env = "AGORA_POLL_INTERVAL")]
    poll_interval: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AGORA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AGORA_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// File config (when given) as the base, CLI flags on top.
    fn into_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let path = path
                    .to_str()
                    .ok_or_else(|| anyhow::anyhow!("config path is not valid UTF-8"))?;
                ClientConfig::from_toml_file(path)?
            }
            None => ClientConfig::default(),
        };

        if let Some(rpc_url) = self.rpc_url {
            config.rpc_url = rpc_url;
        }
        if let Some(ws_url) = self.ws_url {
            config.ws_url = ws_url;
        }
        if let Some(wallet_url) = self.wallet_url {
            config.wallet_url = wallet_url;
        }
        if let Some(poll_interval) = self.poll_interval {
            config.poll_interval_secs = poll_interval;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();
    let config = cli.into_config()?;

    agora_client::init_logging(
        LogFormat::from_config_str(&config.log_format),
        &config.log_level,
    );
    if let Some(path) = &config_path {
        tracing::info!("loaded config from {}", path.display());
    }

    // An ownership transfer invalidates cached authority; the client asks
    // for a restart and we rebuild it from scratch.
    loop {
        tracing::info!(
            rpc = %config.rpc_url,
            ws = %config.ws_url,
            wallet = %config.wallet_url,
            chain = %config.expected_chain_id,
            "starting agora client"
        );

        let wallet = Arc::new(RpcWallet::new(&config.wallet_url)?);
        let ledger = Arc::new(RpcLedger::new(&config.rpc_url)?);
        let events = Box::new(WsEventStream::new(&config.ws_url));

        // Best-effort early warning; the sync engine re-checks the chain on
        // every pull.
        match wallet.chain_id().await {
            Ok(chain) if chain != config.expected_chain_id => {
                tracing::warn!(%chain, expected = %config.expected_chain_id, "wallet is on an unexpected chain");
            }
            Ok(chain) => tracing::debug!(%chain, "wallet chain verified"),
            Err(e) => tracing::debug!(error = %e, "could not read wallet chain id"),
        }

        let mut client = Client::start(&config, wallet, ledger, events);

        if let Some(notices) = client.take_notices() {
            tokio::spawn(log_notices(notices));
        }

        match client.run().await {
            RunOutcome::Restart => {
                tracing::info!("restarting client");
                continue;
            }
            RunOutcome::Shutdown => break,
        }
    }

    tracing::info!("agora daemon exited cleanly");
    Ok(())
}

/// Render every notice as a log line; a headless run has no other surface.
async fn log_notices(mut notices: tokio::sync::mpsc::Receiver<Notice>) {
    while let Some(notice) = notices.recv().await {
        match &notice {
            Notice::ReadError(_) | Notice::Rejected { .. } => tracing::warn!("{notice}"),
            _ => tracing::info!("{notice}"),
        }
    }
}
