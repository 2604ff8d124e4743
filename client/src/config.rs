//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};

use agora_types::{Address, ChainId, LedgerParams};

use crate::error::ClientError;

/// Configuration for the agora client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Contract bridge endpoint for reads and writes.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// WebSocket endpoint for the contract event subscription.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// Wallet bridge endpoint for identity and chain detection.
    #[serde(default = "default_wallet_url")]
    pub wallet_url: String,

    /// The chain the contract is expected to live on.
    #[serde(default = "default_expected_chain_id")]
    pub expected_chain_id: ChainId,

    /// Fixed identity with a permanent authorization override, checked in
    /// addition to the remote owner field.
    #[serde(default = "default_superuser_address")]
    pub superuser_address: Address,

    /// Wallet polling interval in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Contract-side constants (stake, vote limit, history display).
    #[serde(default)]
    pub params: LedgerParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_ws_url() -> String {
    "ws://127.0.0.1:8546".to_string()
}

fn default_wallet_url() -> String {
    "http://127.0.0.1:9545".to_string()
}

fn default_expected_chain_id() -> ChainId {
    ChainId::SEPOLIA
}

fn default_superuser_address() -> Address {
    Address::new("0x153dfef4355e823dcb0fcc76efe942befca86477")
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            ws_url: default_ws_url(),
            wallet_url: default_wallet_url(),
            expected_chain_id: default_expected_chain_id(),
            superuser_address: default_superuser_address(),
            poll_interval_secs: default_poll_interval_secs(),
            params: LedgerParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
