//! Append-only registry of detected wallets.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::WalletDescriptor;
use crate::host::ProviderRef;

/// How a wallet was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Found at the descriptor's primary global key.
    GlobalKey,
    /// Found at one of the descriptor's alternate keys.
    AlternateKey,
    /// Found inside the shared aggregated provider array.
    AggregatedList,
    /// Announced itself over the host's event bus.
    Announcement,
}

/// A wallet found at runtime, paired with the object it injected.
#[derive(Debug, Clone)]
pub struct DetectedWallet {
    /// Static metadata, from the catalog or synthesized.
    pub descriptor: Arc<WalletDescriptor>,
    /// The injected provider (or channel) object.
    pub provider: ProviderRef,
    /// Discovery strategy that found it.
    pub source: DetectionSource,
}

impl DetectedWallet {
    /// Create a detection record.
    #[must_use]
    pub const fn new(
        descriptor: Arc<WalletDescriptor>,
        provider: ProviderRef,
        source: DetectionSource,
    ) -> Self {
        Self {
            descriptor,
            provider,
            source,
        }
    }

    /// Wallet identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    /// Whether the injected object is only a message channel.
    #[inline]
    #[must_use]
    pub fn is_channel_only(&self) -> bool {
        self.descriptor.uses_channel_only
    }
}

/// Wallets keyed by identifier, in discovery order.
///
/// Registration is insert-if-absent: the first provider seen for an
/// identifier stays bound to it until the registry is cleared.
#[derive(Debug, Default)]
pub struct Registry {
    wallets: Vec<DetectedWallet>,
}

impl Registry {
    /// Create an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a wallet unless its identifier is already present.
    ///
    /// Returns `true` if the wallet was inserted.
    pub fn insert(&mut self, wallet: DetectedWallet) -> bool {
        if self.contains(wallet.id()) {
            return false;
        }
        self.wallets.push(wallet);
        true
    }

    /// Check whether an identifier is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.wallets.iter().any(|w| w.id() == id)
    }

    /// Get a wallet by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DetectedWallet> {
        self.wallets.iter().find(|w| w.id() == id)
    }

    /// Copy of all entries in discovery order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DetectedWallet> {
        self.wallets.clone()
    }

    /// Iterate over entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &DetectedWallet> {
        self.wallets.iter()
    }

    /// Number of registered wallets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    /// Whether no wallet is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.wallets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;

    fn detected(id: &str, provider: &ProviderRef) -> DetectedWallet {
        DetectedWallet::new(
            Arc::new(WalletDescriptor::new(id, id, id)),
            Arc::clone(provider),
            DetectionSource::GlobalKey,
        )
    }

    #[test]
    fn test_first_registration_wins() {
        let first = MockProvider::new().method("connect").shared();
        let second = MockProvider::new().method("enable").shared();

        let mut registry = Registry::new();
        assert!(registry.insert(detected("sender", &first)));
        assert!(!registry.insert(detected("sender", &second)));

        assert_eq!(registry.len(), 1);
        let kept = registry.get("sender").unwrap();
        assert!(Arc::ptr_eq(&kept.provider, &first));
    }

    #[test]
    fn test_snapshot_keeps_discovery_order() {
        let provider = MockProvider::new().method("connect").shared();
        let mut registry = Registry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.insert(detected(id, &provider));
        }

        let ids: Vec<_> = registry.snapshot().iter().map(|w| w.id().to_string()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.contains("zeta"));
    }
}
