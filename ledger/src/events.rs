//! Asynchronous events emitted by the remote contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Contract events the client subscribes to for the lifetime of the process.
///
/// Delivery order relative to polled reads is not guaranteed: the same vote
/// may arrive here before or after a pull observes it. Consumers must treat
/// duplicate observations as harmless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A vote was cast for the proposal at `proposal_index`.
    VoteCast { proposal_index: u64 },
    /// A winner was declared.
    WinnerDeclared { winner_name: String },
}

/// A live subscription to contract events.
#[async_trait]
pub trait EventStream: Send {
    /// Wait for the next event.
    ///
    /// Errors are per-delivery: the subscription itself survives them and
    /// the caller is expected to keep calling.
    async fn next_event(&mut self) -> Result<LedgerEvent, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_cast_wire_format() {
        let json = r#"{"event":"vote_cast","proposal_index":2}"#;
        let event: LedgerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, LedgerEvent::VoteCast { proposal_index: 2 });
    }

    #[test]
    fn winner_declared_wire_format() {
        let json = r#"{"event":"winner_declared","winner_name":"Alice"}"#;
        let event: LedgerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            LedgerEvent::WinnerDeclared {
                winner_name: "Alice".into()
            }
        );
    }

    #[test]
    fn unknown_event_tag_is_an_error() {
        let json = r#"{"event":"contract_paused"}"#;
        assert!(serde_json::from_str::<LedgerEvent>(json).is_err());
    }
}
