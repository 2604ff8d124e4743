//! Agora voting client core — the ledger synchronization engine.
//!
//! The client reconciles three weakly-ordered signals into one consistent
//! view of the remote voting contract:
//! - the identity monitor's polling of the local wallet,
//! - asynchronous contract events from the event listener,
//! - completions of user-initiated writes from the command dispatcher.
//!
//! All three feed triggers into the synchronization coordinator, which owns
//! the authoritative snapshot and runs at most one pull at a time.

pub mod client;
pub mod config;
pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod listener;
pub mod logging;
pub mod monitor;
pub mod notice;
pub mod reader;
pub mod shutdown;
pub mod view;

pub use client::{Client, RunOutcome};
pub use config::ClientConfig;
pub use coordinator::{SyncCoordinator, Trigger};
pub use dispatcher::{Command, CommandDispatcher, Outcome};
pub use error::ClientError;
pub use listener::EventListener;
pub use logging::{init_logging, LogFormat};
pub use monitor::IdentityMonitor;
pub use notice::{Notice, Notifier};
pub use shutdown::{RestartController, ShutdownController};
pub use view::{ClientView, SyncPhase};
