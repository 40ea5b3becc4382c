//! Wallet detection orchestration.
//!
//! The [`Detector`] owns the registry and the subscriber set. One `detect`
//! call subscribes to announcements (once per lifetime), dispatches the
//! ready broadcasts, runs an immediate scan pass and then re-scans along a
//! bounded backoff schedule, since extensions may inject after page load.
//!
//! ```text
//!   Idle ──detect()──▶ Scanning ──schedule exhausted / timeout──▶ Idle
//!                        │
//!                        └─ detect() while scanning: returns snapshot
//! ```
//!
//! The announcement listener outlives `detect`: late wallets still register
//! and still notify subscribers. `detect` only promises the wallets found
//! within its budget.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{Instrument, debug, info, info_span};

use crate::catalog::Catalog;
use crate::config::DetectorConfig;
use crate::events::AnnouncementListener;
use crate::host::{Host, ListenerId};
use crate::registry::{DetectedWallet, Registry};
use crate::scanner::GlobalScanner;

/// Callback receiving the full registry snapshot on every change.
pub type SnapshotCallback = Arc<dyn Fn(&[DetectedWallet]) + Send + Sync>;

/// Discovers injected wallets and keeps a deduplicated registry of them.
///
/// Cloning yields another handle to the same detector.
#[derive(Clone)]
pub struct Detector {
    inner: Arc<DetectorInner>,
}

struct DetectorInner {
    host: Arc<dyn Host>,
    catalog: Arc<Catalog>,
    config: DetectorConfig,
    listener: AnnouncementListener,
    registry: Mutex<Registry>,
    subscribers: Mutex<Vec<(u64, SnapshotCallback)>>,
    /// Held from registry insert through subscriber delivery, so snapshots
    /// reach subscribers in registration order.
    delivery: Mutex<()>,
    next_subscriber: AtomicU64,
    scanning: AtomicBool,
    listener_id: Mutex<Option<ListenerId>>,
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self
            .inner
            .registry()
            .iter()
            .map(|w| w.id().to_string())
            .collect();
        f.debug_struct("Detector")
            .field("wallets", &ids)
            .field("scanning", &self.is_scanning())
            .finish_non_exhaustive()
    }
}

impl Detector {
    /// Create a detector over a host with the built-in catalog and default
    /// configuration.
    #[must_use]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self::with_config(host, Catalog::builtin(), DetectorConfig::default())
    }

    /// Create a detector with an explicit catalog and configuration.
    #[must_use]
    pub fn with_config(host: Arc<dyn Host>, catalog: Catalog, config: DetectorConfig) -> Self {
        Self {
            inner: Arc::new(DetectorInner {
                host,
                catalog: Arc::new(catalog),
                listener: AnnouncementListener::new(&config),
                config,
                registry: Mutex::new(Registry::new()),
                subscribers: Mutex::new(Vec::new()),
                delivery: Mutex::new(()),
                next_subscriber: AtomicU64::new(1),
                scanning: AtomicBool::new(false),
                listener_id: Mutex::new(None),
            }),
        }
    }

    /// The detector's configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.inner.config
    }

    /// The catalog of known wallets.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Whether a `detect` call is in flight.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.inner.scanning.load(Ordering::Acquire)
    }

    /// Current registry contents in discovery order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DetectedWallet> {
        self.inner.registry().snapshot()
    }

    /// Look up a detected wallet by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<DetectedWallet> {
        self.inner.registry().get(id).cloned()
    }

    /// Discover wallets for at most `timeout`.
    ///
    /// A call made while another is still scanning returns the current
    /// snapshot immediately instead of starting a second retry loop.
    pub async fn detect(&self, timeout: Duration) -> Vec<DetectedWallet> {
        if self.inner.scanning.swap(true, Ordering::AcqRel) {
            debug!("detection already in progress, returning snapshot");
            return self.snapshot();
        }
        let _scanning = ScanningGuard(&self.inner.scanning);

        self.run_schedule(timeout)
            .instrument(info_span!("detect", ?timeout))
            .await;

        let wallets = self.snapshot();
        info!(found = wallets.len(), "wallet detection finished");
        wallets
    }

    /// Discover wallets using the configured timeout.
    pub async fn detect_default(&self) -> Vec<DetectedWallet> {
        self.detect(self.inner.config.timeout).await
    }

    async fn run_schedule(&self, timeout: Duration) {
        let started = Instant::now();

        self.start_listening();
        self.inner.listener.broadcast_ready(self.inner.host.as_ref());
        self.inner.scan_pass();

        for (attempt, delay) in self.inner.config.retry_delays.iter().enumerate() {
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                debug!(attempt, "detection budget exhausted");
                break;
            }
            sleep((*delay).min(timeout - elapsed)).await;
            debug!(attempt, "retrying global scan");
            self.inner.scan_pass();
        }
    }

    /// Subscribe to announcements, once per lifetime.
    fn start_listening(&self) {
        let mut slot = lock(&self.inner.listener_id);
        if slot.is_some() {
            return;
        }
        let weak: Weak<DetectorInner> = Arc::downgrade(&self.inner);
        let id = self.inner.listener.subscribe(
            self.inner.host.as_ref(),
            Arc::clone(&self.inner.catalog),
            move |wallet| {
                if let Some(inner) = weak.upgrade() {
                    inner.register(wallet);
                }
            },
        );
        *slot = Some(id);
    }

    /// Register a detection through the dedup path.
    ///
    /// Returns `true` if the wallet was new; subscribers are notified
    /// before this returns.
    pub fn register(&self, wallet: DetectedWallet) -> bool {
        self.inner.register(wallet)
    }

    /// Subscribe to registry changes.
    ///
    /// The callback receives the full snapshot on every new registration,
    /// and once immediately if wallets were already found.
    ///
    /// Callbacks may read the detector but must not register wallets.
    pub fn subscribe(&self, callback: impl Fn(&[DetectedWallet]) + Send + Sync + 'static) -> Subscription {
        let callback: SnapshotCallback = Arc::new(callback);
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);

        let _delivery = lock(&self.inner.delivery);
        lock(&self.inner.subscribers).push((id, Arc::clone(&callback)));
        let snapshot = self.snapshot();
        if !snapshot.is_empty() {
            callback(&snapshot);
        }

        Subscription {
            id,
            detector: Arc::downgrade(&self.inner),
        }
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    /// Tear down: stop listening, drop every detection and subscriber.
    ///
    /// The detector can be used again afterwards.
    pub fn destroy(&self) {
        if let Some(id) = lock(&self.inner.listener_id).take() {
            self.inner.host.remove_event_listener(id);
        }
        self.inner.registry().clear();
        lock(&self.inner.subscribers).clear();
        debug!("detector destroyed");
    }
}

impl DetectorInner {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }

    fn scan_pass(&self) -> usize {
        let scanner = GlobalScanner::new(
            self.host.as_ref(),
            &self.catalog,
            &self.config.aggregated_list_key,
        );
        scanner.scan(|id| self.registry().contains(id), |wallet| self.register(wallet))
    }

    fn register(&self, wallet: DetectedWallet) -> bool {
        let id = wallet.id().to_string();
        let source = wallet.source;
        let _delivery = lock(&self.delivery);
        let snapshot = {
            let mut registry = self.registry();
            if !registry.insert(wallet) {
                return false;
            }
            registry.snapshot()
        };

        info!(wallet = %id, ?source, "wallet detected");
        self.notify(&snapshot);
        true
    }

    fn notify(&self, snapshot: &[DetectedWallet]) {
        let callbacks: Vec<SnapshotCallback> = lock(&self.subscribers)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(snapshot);
        }
    }
}

/// Handle returned by [`Detector::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    detector: Weak<DetectorInner>,
}

impl Subscription {
    /// Stop receiving notifications. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.detector.upgrade() {
            lock(&inner.subscribers).retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for DetectorInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorInner").finish_non_exhaustive()
    }
}

/// Clears the scanning flag when `detect` finishes.
struct ScanningGuard<'a>(&'a AtomicBool);

impl Drop for ScanningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
