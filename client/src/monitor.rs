//! Identity monitor — polls the wallet and reports status transitions.

use std::sync::Arc;
use std::time::Duration;

use agora_types::WalletStatus;
use agora_wallet::{WalletError, WalletProvider};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::coordinator::Trigger;
use crate::notice::{Notice, Notifier};

/// Polls the wallet provider at a fixed interval and publishes an
/// [`Trigger::IdentityChanged`] whenever the observed status differs from
/// the previous poll.
///
/// The very first poll always counts as a transition, so the coordinator
/// learns the initial identity without a special bootstrap path.
pub struct IdentityMonitor {
    provider: Arc<dyn WalletProvider>,
    triggers: mpsc::Sender<Trigger>,
    notices: Notifier,
    poll_interval: Duration,
    last: Option<WalletStatus>,
}

impl IdentityMonitor {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        triggers: mpsc::Sender<Trigger>,
        notices: Notifier,
        poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            triggers,
            notices,
            poll_interval,
            last: None,
        }
    }

    /// Run until shutdown, polling every `poll_interval`.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    debug!("identity monitor shutting down");
                    return;
                }
                _ = ticker.tick() => self.poll().await,
            }
        }
    }

    async fn poll(&mut self) {
        let status = match self.provider.accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(address) => WalletStatus::Connected(address),
                None => WalletStatus::NotConnected,
            },
            Err(WalletError::Unavailable) => WalletStatus::Unavailable,
            Err(e) => {
                // Transient provider failure; keep the last known status.
                debug!(error = %e, "wallet poll failed");
                return;
            }
        };

        if self.last.as_ref() == Some(&status) {
            return;
        }
        info!(status = %status, "wallet status changed");
        self.last = Some(status.clone());

        match &status {
            WalletStatus::Unavailable => self.notices.publish(Notice::WalletUnavailable),
            WalletStatus::NotConnected => self.notices.publish(Notice::WalletDisconnected),
            WalletStatus::Connected(address) => {
                self.notices.publish(Notice::AccountChanged(address.clone()))
            }
        }
        let _ = self.triggers.send(Trigger::IdentityChanged(status)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_nullables::NullWallet;
    use agora_types::Address;

    fn monitor(
        wallet: Arc<NullWallet>,
    ) -> (IdentityMonitor, mpsc::Receiver<Trigger>, mpsc::Receiver<Notice>) {
        let (trigger_tx, trigger_rx) = mpsc::channel(16);
        let (notifier, notice_rx) = Notifier::channel(16);
        let m = IdentityMonitor::new(wallet, trigger_tx, notifier, Duration::from_secs(1));
        (m, trigger_rx, notice_rx)
    }

    #[tokio::test]
    async fn first_poll_always_reports() {
        let wallet = Arc::new(NullWallet::new(WalletStatus::NotConnected));
        let (mut m, mut triggers, mut notices) = monitor(wallet);

        m.poll().await;

        assert!(matches!(
            triggers.try_recv(),
            Ok(Trigger::IdentityChanged(WalletStatus::NotConnected))
        ));
        assert_eq!(notices.try_recv(), Ok(Notice::WalletDisconnected));
    }

    #[tokio::test]
    async fn unchanged_status_is_silent() {
        let wallet = Arc::new(NullWallet::new(WalletStatus::NotConnected));
        let (mut m, mut triggers, _notices) = monitor(wallet);

        m.poll().await;
        triggers.try_recv().ok();
        m.poll().await;

        assert!(triggers.try_recv().is_err());
    }

    #[tokio::test]
    async fn account_switch_fires_trigger_and_notice() {
        let addr_a = Address::new("0x00000000000000000000000000000000000000aa");
        let addr_b = Address::new("0x00000000000000000000000000000000000000bb");
        let wallet = Arc::new(NullWallet::connected(addr_a));
        let (mut m, mut triggers, mut notices) = monitor(Arc::clone(&wallet));

        m.poll().await;
        triggers.try_recv().ok();
        notices.try_recv().ok();

        wallet.set_status(WalletStatus::Connected(addr_b.clone()));
        m.poll().await;

        assert!(matches!(
            triggers.try_recv(),
            Ok(Trigger::IdentityChanged(WalletStatus::Connected(a))) if a == addr_b
        ));
        assert_eq!(notices.try_recv(), Ok(Notice::AccountChanged(addr_b)));
    }

    #[tokio::test]
    async fn unavailable_provider_is_a_status_not_an_error() {
        let wallet = Arc::new(NullWallet::new(WalletStatus::Unavailable));
        let (mut m, mut triggers, mut notices) = monitor(wallet);

        m.poll().await;

        assert!(matches!(
            triggers.try_recv(),
            Ok(Trigger::IdentityChanged(WalletStatus::Unavailable))
        ));
        assert_eq!(notices.try_recv(), Ok(Notice::WalletUnavailable));
    }

    #[tokio::test]
    async fn transient_read_failure_keeps_last_status() {
        let addr = Address::new("0x00000000000000000000000000000000000000aa");
        let wallet = Arc::new(NullWallet::connected(addr));
        let (mut m, mut triggers, _notices) = monitor(Arc::clone(&wallet));

        m.poll().await;
        triggers.try_recv().ok();

        wallet.set_fail_reads(true);
        m.poll().await;

        assert!(triggers.try_recv().is_err());
    }
}
