//! Remote ledger surface for the agora client.
//!
//! Defines the contract read/write trait the sync engine is written against,
//! the asynchronous event stream, and the production JSON-RPC / WebSocket
//! implementations. All numeric values cross this boundary as text, exactly
//! as the remote encodes them; parsing is the state reader's responsibility.

pub mod contract;
pub mod error;
pub mod events;
pub mod rpc;
pub mod ws;

pub use contract::{ProposalLedger, RawHistoryEntry};
pub use error::LedgerError;
pub use events::{EventStream, LedgerEvent};
pub use rpc::RpcLedger;
pub use ws::WsEventStream;
