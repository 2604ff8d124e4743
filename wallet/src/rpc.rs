//! HTTP JSON-RPC wallet provider.
//!
//! Talks to a local wallet bridge exposing the standard `eth_accounts` and
//! `eth_chainId` methods. Connection-level failures map to
//! [`WalletError::Unavailable`]: if the bridge cannot be reached, there is
//! effectively no wallet integration.

use agora_types::{Address, ChainId};
use async_trait::async_trait;
use std::time::Duration;

use crate::error::WalletError;
use crate::provider::WalletProvider;

/// JSON-RPC client for a local wallet bridge.
#[derive(Clone)]
pub struct RpcWallet {
    http: reqwest::Client,
    url: String,
}

impl RpcWallet {
    /// Create a new provider targeting the given base URL.
    pub fn new(url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Provider(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(&self, method: &str) -> Result<serde_json::Value, WalletError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [],
        });

        let response = self.http.post(&self.url).json(&body).send().await.map_err(|e| {
            if e.is_connect() {
                WalletError::Unavailable
            } else {
                WalletError::Provider(format!("request failed: {e}"))
            }
        })?;

        if !response.status().is_success() {
            return Err(WalletError::Provider(format!(
                "wallet bridge returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WalletError::Provider(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error") {
            return Err(WalletError::Provider(format!("wallet error: {err}")));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| WalletError::Provider("response missing result field".into()))
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        let result = self.rpc_call("eth_accounts").await?;
        parse_accounts(&result)
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        let result = self.rpc_call("eth_chainId").await?;
        let raw = result
            .as_str()
            .ok_or_else(|| WalletError::InvalidChainId(result.to_string()))?;
        parse_chain_id(raw)
    }
}

/// Decode an `eth_accounts` result into typed addresses.
fn parse_accounts(result: &serde_json::Value) -> Result<Vec<Address>, WalletError> {
    let entries = result
        .as_array()
        .ok_or_else(|| WalletError::Provider("accounts result is not an array".into()))?;
    entries
        .iter()
        .map(|entry| {
            let raw = entry
                .as_str()
                .ok_or_else(|| WalletError::InvalidAddress(entry.to_string()))?;
            raw.parse()
                .map_err(|_| WalletError::InvalidAddress(raw.to_string()))
        })
        .collect()
}

/// Decode an `eth_chainId` result (`0x`-prefixed hex) into a [`ChainId`].
fn parse_chain_id(raw: &str) -> Result<ChainId, WalletError> {
    let hex = raw
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::InvalidChainId(raw.to_string()))?;
    u64::from_str_radix(hex, 16)
        .map(ChainId::new)
        .map_err(|_| WalletError::InvalidChainId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accounts_typed_and_normalized() {
        let result = serde_json::json!([
            "0x153dfef4355E823dCB0FCc76Efe942BefCa86477",
            "0x00000000000000000000000000000000000000aa",
        ]);
        let accounts = parse_accounts(&result).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(
            accounts[0].as_str(),
            "0x153dfef4355e823dcb0fcc76efe942befca86477"
        );
    }

    #[test]
    fn parse_accounts_empty_is_ok() {
        let accounts = parse_accounts(&serde_json::json!([])).unwrap();
        assert!(accounts.is_empty());
    }

    #[test]
    fn parse_accounts_rejects_garbage() {
        let result = parse_accounts(&serde_json::json!(["not-an-address"]));
        assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
    }

    #[test]
    fn parse_chain_id_hex() {
        // 0xaa36a7 == 11155111 (Sepolia)
        assert_eq!(parse_chain_id("0xaa36a7").unwrap(), ChainId::SEPOLIA);
    }

    #[test]
    fn parse_chain_id_rejects_decimal() {
        assert!(parse_chain_id("11155111").is_err());
    }
}
