//! Fixture loading and the detection run.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::time::sleep;
use tracing::{debug, warn};
use wallet_inject::mock::{HostFixture, MockHost};
use wallet_inject::{
    Account, Announcement, Catalog, DetectedWallet, Detector, DetectorConfig, Host, SignInParams,
    WalletAdapter,
};

/// Read a host fixture from disk.
pub async fn load_fixture(path: &Path) -> anyhow::Result<HostFixture> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
}

/// Read a descriptor list from disk.
pub async fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading catalog {}", path.display()))?;
    Catalog::from_json(&raw).with_context(|| format!("parsing catalog {}", path.display()))
}

/// Read a detector configuration from disk.
pub async fn load_config(path: &Path) -> anyhow::Result<DetectorConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Apply a timeout override on top of a loaded configuration.
#[must_use]
pub fn resolve_config(config: DetectorConfig, timeout_ms: Option<u64>) -> DetectorConfig {
    match timeout_ms {
        Some(ms) => config.with_timeout(Duration::from_millis(ms)),
        None => config,
    }
}

/// Connect the adapter of wallet `id` and return the accounts it reports.
pub async fn sign_in(adapters: &[Arc<WalletAdapter>], id: &str) -> anyhow::Result<Vec<Account>> {
    let adapter = adapters
        .iter()
        .find(|a| a.id() == id)
        .ok_or_else(|| anyhow::anyhow!("wallet '{id}' was not detected"))?;
    let accounts = adapter.sign_in(&SignInParams::default()).await?;
    debug!(wallet = %id, accounts = accounts.len(), "sign-in finished");
    Ok(accounts)
}

/// A simulated page: mock host, detector and the announcements to replay.
#[derive(Debug)]
pub struct Simulation {
    host: Arc<MockHost>,
    detector: Detector,
    announcements: Vec<Announcement>,
    announce_after: Duration,
}

impl Simulation {
    /// Build the simulated host and a detector watching it.
    #[must_use]
    pub fn new(
        fixture: &HostFixture,
        catalog: Catalog,
        config: DetectorConfig,
        announce_after: Duration,
    ) -> Self {
        let host = Arc::new(MockHost::from_fixture(fixture));
        let detector = Detector::with_config(Arc::clone(&host) as Arc<dyn Host>, catalog, config);
        Self {
            host,
            detector,
            announcements: fixture
                .announcements
                .iter()
                .map(|a| a.to_announcement())
                .collect(),
            announce_after,
        }
    }

    /// The detector under simulation.
    #[must_use]
    pub const fn detector(&self) -> &Detector {
        &self.detector
    }

    /// The simulated host.
    #[must_use]
    pub const fn host(&self) -> &Arc<MockHost> {
        &self.host
    }

    /// Run detection while replaying the fixture announcements.
    ///
    /// Announcements scheduled after the detection budget still land, so
    /// the returned list includes them.
    pub async fn run(&self) -> Vec<DetectedWallet> {
        let host = Arc::clone(&self.host);
        let event = self.detector.config().announce_event.clone();
        let announcements = self.announcements.clone();
        let delay = self.announce_after;

        let announcer = tokio::spawn(async move {
            sleep(delay).await;
            for announcement in &announcements {
                debug!(wallet = %announcement.id, "replaying announcement");
                host.announce(&event, announcement);
            }
        });

        let found = self.detector.detect_default().await;
        debug!(count = found.len(), "detection finished");

        if let Err(err) = announcer.await {
            warn!(error = %err, "announcement replay aborted");
        }
        self.detector.snapshot()
    }

    /// One adapter per detection, in discovery order.
    #[must_use]
    pub fn adapters(wallets: &[DetectedWallet]) -> Vec<Arc<WalletAdapter>> {
        wallets
            .iter()
            .cloned()
            .map(|wallet| Arc::new(WalletAdapter::new(wallet)))
            .collect()
    }
}
