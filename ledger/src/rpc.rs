//! HTTP JSON-RPC implementation of the contract surface.
//!
//! Talks to a contract bridge that exposes the voting contract's methods by
//! name. One `call` helper carries the method and params; reads extract the
//! `result` field, writes map a remote `error` field to
//! [`LedgerError::Rejected`].

use agora_types::{Address, Wei};
use async_trait::async_trait;
use std::time::Duration;

use crate::contract::{ProposalLedger, RawHistoryEntry};
use crate::error::LedgerError;

/// JSON-RPC client for the voting contract bridge.
#[derive(Clone)]
pub struct RpcLedger {
    http: reqwest::Client,
    url: String,
}

impl RpcLedger {
    /// Create a new client targeting the given bridge base URL.
    pub fn new(url: impl Into<String>) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Rpc(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Send one request and return the raw response body.
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, LedgerError> {
        let body = serde_json::json!({ "method": method, "params": params });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Rpc(format!("{method} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Rpc(format!(
                "{method} returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LedgerError::Rpc(format!("{method} returned invalid JSON: {e}")))
    }

    /// Issue a read-only query and return its `result` field.
    async fn query(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, LedgerError> {
        let json = self.call(method, params).await?;
        if let Some(err) = json.get("error") {
            return Err(LedgerError::Rpc(format!("{method} failed: {err}")));
        }
        json.get("result")
            .cloned()
            .ok_or_else(|| LedgerError::Rpc(format!("{method} response missing result")))
    }

    /// Submit a state-changing request; a remote `error` is a rejection.
    async fn submit(&self, method: &str, params: serde_json::Value) -> Result<(), LedgerError> {
        let json = self.call(method, params).await?;
        if let Some(err) = json.get("error") {
            return Err(LedgerError::Rejected(format!("{method}: {err}")));
        }
        Ok(())
    }

    fn decode_string(method: &'static str, value: serde_json::Value) -> Result<String, LedgerError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LedgerError::Rpc(format!("{method} result is not a string")))
    }

    fn decode_string_list(
        method: &'static str,
        value: serde_json::Value,
    ) -> Result<Vec<String>, LedgerError> {
        let entries = value
            .as_array()
            .ok_or_else(|| LedgerError::Rpc(format!("{method} result is not an array")))?;
        entries
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| LedgerError::Rpc(format!("{method} entry is not a string")))
            })
            .collect()
    }
}

#[async_trait]
impl ProposalLedger for RpcLedger {
    async fn owner(&self) -> Result<String, LedgerError> {
        let result = self.query("owner", serde_json::json!({})).await?;
        Self::decode_string("owner", result)
    }

    async fn proposals(&self) -> Result<Vec<String>, LedgerError> {
        let result = self.query("getProposals", serde_json::json!({})).await?;
        Self::decode_string_list("getProposals", result)
    }

    async fn proposal_votes(&self) -> Result<Vec<String>, LedgerError> {
        let result = self.query("getProposalVotes", serde_json::json!({})).await?;
        Self::decode_string_list("getProposalVotes", result)
    }

    async fn winner(&self) -> Result<String, LedgerError> {
        let result = self.query("getWinner", serde_json::json!({})).await?;
        Self::decode_string("getWinner", result)
    }

    async fn voting_ended(&self) -> Result<bool, LedgerError> {
        let result = self.query("votingEnded", serde_json::json!({})).await?;
        result
            .as_bool()
            .ok_or_else(|| LedgerError::Rpc("votingEnded result is not a boolean".into()))
    }

    async fn voter_vote_count(&self, voter: &Address) -> Result<String, LedgerError> {
        let result = self
            .query(
                "voterVoteCount",
                serde_json::json!({ "voter": voter.as_str() }),
            )
            .await?;
        Self::decode_string("voterVoteCount", result)
    }

    async fn network_id(&self) -> Result<String, LedgerError> {
        let result = self.query("netVersion", serde_json::json!({})).await?;
        Self::decode_string("netVersion", result)
    }

    async fn voting_history(&self) -> Result<Vec<RawHistoryEntry>, LedgerError> {
        let result = self.query("getVotingHistory", serde_json::json!({})).await?;
        serde_json::from_value(result)
            .map_err(|e| LedgerError::Rpc(format!("invalid getVotingHistory response: {e}")))
    }

    async fn vote(&self, from: &Address, index: usize, stake: Wei) -> Result<(), LedgerError> {
        self.submit(
            "vote",
            serde_json::json!({
                "from": from.as_str(),
                "index": index,
                "value": stake.raw().to_string(),
            }),
        )
        .await
    }

    async fn end_voting(&self, from: &Address) -> Result<(), LedgerError> {
        self.submit("endVoting", serde_json::json!({ "from": from.as_str() }))
            .await
    }

    async fn declare_winner(&self, from: &Address) -> Result<(), LedgerError> {
        self.submit("declareWinner", serde_json::json!({ "from": from.as_str() }))
            .await
    }

    async fn reset_voting(&self, from: &Address) -> Result<(), LedgerError> {
        self.submit("resetVoting", serde_json::json!({ "from": from.as_str() }))
            .await
    }

    async fn withdraw(&self, from: &Address) -> Result<(), LedgerError> {
        self.submit("withdraw", serde_json::json!({ "from": from.as_str() }))
            .await
    }

    async fn transfer_ownership(
        &self,
        from: &Address,
        new_owner: &Address,
    ) -> Result<(), LedgerError> {
        self.submit(
            "transferOwnership",
            serde_json::json!({
                "from": from.as_str(),
                "newOwner": new_owner.as_str(),
            }),
        )
        .await
    }

    async fn destroy(&self, from: &Address) -> Result<(), LedgerError> {
        self.submit("destroy", serde_json::json!({ "from": from.as_str() }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_string_list_rejects_mixed_types() {
        let value = serde_json::json!(["Alice", 7]);
        assert!(RpcLedger::decode_string_list("getProposals", value).is_err());
    }

    #[test]
    fn decode_string_rejects_numbers() {
        // The bridge must encode numerics as text; a raw number is a
        // malformed response, not something to coerce.
        assert!(RpcLedger::decode_string("voterVoteCount", serde_json::json!(3)).is_err());
    }
}
