//! Client assembly — wires the core tasks together and supervises them.

use std::sync::Arc;
use std::time::Duration;

use agora_ledger::{EventStream, ProposalLedger};
use agora_wallet::WalletProvider;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::coordinator::{SyncCoordinator, Trigger};
use crate::dispatcher::CommandDispatcher;
use crate::listener::EventListener;
use crate::monitor::IdentityMonitor;
use crate::notice::{Notice, Notifier};
use crate::shutdown::{RestartController, ShutdownController};
use crate::view::ClientView;

const TRIGGER_CAPACITY: usize = 64;
const NOTICE_CAPACITY: usize = 256;
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Why [`Client::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A shutdown signal was received; the process should exit.
    Shutdown,
    /// The client must be rebuilt (e.g. after an ownership transfer).
    Restart,
}

/// A running agora client: coordinator, identity monitor and event listener
/// tasks, plus the dispatcher handle for issuing commands.
pub struct Client {
    shutdown: ShutdownController,
    restart_rx: tokio::sync::broadcast::Receiver<()>,
    dispatcher: CommandDispatcher,
    view_rx: watch::Receiver<ClientView>,
    notices: Option<mpsc::Receiver<Notice>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Client {
    /// Wire up and start all core tasks against the given adapters.
    pub fn start(
        config: &ClientConfig,
        wallet: Arc<dyn WalletProvider>,
        ledger: Arc<dyn ProposalLedger>,
        events: Box<dyn EventStream>,
    ) -> Self {
        let shutdown = ShutdownController::new();
        let restart = RestartController::new();
        // Subscribed up front so a restart requested before `run` is first
        // polled is not lost.
        let restart_rx = restart.subscribe();
        let (notifier, notice_rx) = Notifier::channel(NOTICE_CAPACITY);
        let (trigger_tx, trigger_rx) = mpsc::channel(TRIGGER_CAPACITY);
        let (view_tx, view_rx) = watch::channel(ClientView::empty());

        let coordinator = SyncCoordinator::new(
            Arc::clone(&ledger),
            trigger_rx,
            view_tx,
            notifier.clone(),
            config.superuser_address.clone(),
            config.expected_chain_id,
            config.params.clone(),
        );
        let monitor = IdentityMonitor::new(
            wallet,
            trigger_tx.clone(),
            notifier.clone(),
            Duration::from_secs(config.poll_interval_secs),
        );
        let listener = EventListener::new(events, trigger_tx.clone(), notifier.clone());
        let dispatcher = CommandDispatcher::new(
            ledger,
            trigger_tx.clone(),
            notifier,
            view_rx.clone(),
            restart.clone(),
            config.params.clone(),
        );

        let tasks = vec![
            tokio::spawn(coordinator.run(shutdown.subscribe())),
            tokio::spawn(monitor.run(shutdown.subscribe())),
            tokio::spawn(listener.run(shutdown.subscribe())),
        ];

        // Channel capacity is fresh; this cannot fail here.
        let _ = trigger_tx.try_send(Trigger::Bootstrap);
        info!("client started");

        Self {
            shutdown,
            restart_rx,
            dispatcher,
            view_rx,
            notices: Some(notice_rx),
            tasks,
        }
    }

    /// Handle for issuing commands.
    pub fn dispatcher(&self) -> CommandDispatcher {
        self.dispatcher.clone()
    }

    /// Watch receiver over the published view.
    pub fn view(&self) -> watch::Receiver<ClientView> {
        self.view_rx.clone()
    }

    /// Take the notice receiver. Yields `Some` exactly once.
    pub fn take_notices(&mut self) -> Option<mpsc::Receiver<Notice>> {
        self.notices.take()
    }

    /// Block until a shutdown signal or a restart request, then stop all
    /// tasks and report which one happened.
    pub async fn run(mut self) -> RunOutcome {
        let outcome = tokio::select! {
            _ = self.shutdown.wait_for_signal() => RunOutcome::Shutdown,
            _ = self.restart_rx.recv() => {
                info!("restart requested");
                RunOutcome::Restart
            }
        };
        self.stop().await;
        outcome
    }

    /// Stop all tasks and wait for them to finish.
    pub async fn stop(&mut self) {
        self.shutdown.shutdown();
        for task in self.tasks.drain(..) {
            if tokio::time::timeout(JOIN_TIMEOUT, task).await.is_err() {
                warn!("task did not stop within {JOIN_TIMEOUT:?}");
            }
        }
        info!("client stopped");
    }
}
