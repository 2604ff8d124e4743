//! Process-level signalling: graceful shutdown and full-client restart.
//!
//! Both controllers wrap the same one-shot broadcast primitive; subsystems
//! call `subscribe` to get a receiver and `select!` on it alongside their
//! main loop.

use tokio::signal;
use tokio::sync::broadcast;

/// A latch-like broadcast: fired once, observed by every subscriber.
#[derive(Clone)]
struct Beacon {
    tx: broadcast::Sender<()>,
}

impl Beacon {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    fn fire(&self) {
        let _ = self.tx.send(());
    }
}

/// Coordinates graceful shutdown across all client tasks.
pub struct ShutdownController {
    beacon: Beacon,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self {
            beacon: Beacon::new(),
        }
    }

    /// Get a receiver that will be notified on shutdown.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.beacon.subscribe()
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        self.beacon.fire();
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
            _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
        }

        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Signals that the whole client must be rebuilt.
///
/// An ownership transfer invalidates the cached authorization in every
/// snapshot; rather than patch around it, the dispatcher requests a full
/// restart and the daemon rebuilds the client from scratch.
#[derive(Clone)]
pub struct RestartController {
    beacon: Beacon,
}

impl RestartController {
    pub fn new() -> Self {
        Self {
            beacon: Beacon::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.beacon.subscribe()
    }

    /// Request a full client restart.
    pub fn request(&self) {
        self.beacon.fire();
    }
}

impl Default for RestartController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn programmatic_shutdown_reaches_every_subscriber() {
        let controller = ShutdownController::new();
        let mut rx1 = controller.subscribe();
        let mut rx2 = controller.subscribe();
        controller.shutdown();
        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[tokio::test]
    async fn restart_request_reaches_subscriber() {
        let controller = RestartController::new();
        let mut rx = controller.subscribe();
        controller.request();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn the_two_signals_are_independent() {
        let shutdown = ShutdownController::new();
        let restart = RestartController::new();
        let mut shutdown_rx = shutdown.subscribe();
        let mut restart_rx = restart.subscribe();

        restart.request();
        assert!(restart_rx.recv().await.is_ok());
        assert!(shutdown_rx.try_recv().is_err());
    }
}
