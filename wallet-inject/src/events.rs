//! Announcement-based discovery.
//!
//! Self-describing wallets broadcast an announcement when they finish
//! injecting, possibly long after the page loaded. The listener turns each
//! announcement into a [`DetectedWallet`] and hands it to the same
//! insert-if-absent path the global scanner uses.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, WalletDescriptor};
use crate::config::DetectorConfig;
use crate::host::{Announcement, Host, HostValue, ListenerId};
use crate::registry::{DetectedWallet, DetectionSource};

/// Subscribes to announcements and emits the legacy ready broadcasts.
#[derive(Debug, Clone)]
pub struct AnnouncementListener {
    event: String,
    ready_events: Vec<String>,
}

impl AnnouncementListener {
    /// Create a listener for the configured event names.
    #[must_use]
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            event: config.announce_event.clone(),
            ready_events: config.ready_events.clone(),
        }
    }

    /// Name of the announcement event.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Dispatch every ready broadcast.
    ///
    /// Compliant wallets wait for any one of these before announcing, and
    /// different generations of wallets wait for different names.
    pub fn broadcast_ready(&self, host: &dyn Host) {
        for name in &self.ready_events {
            host.dispatch_event(name);
        }
        debug!(count = self.ready_events.len(), "ready broadcasts dispatched");
    }

    /// Register on the host. Every usable announcement reaches `on_detection`.
    pub fn subscribe(
        &self,
        host: &dyn Host,
        catalog: Arc<Catalog>,
        on_detection: impl Fn(DetectedWallet) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = host.add_event_listener(
            &self.event,
            Arc::new(move |announcement: Announcement| {
                if let Some(wallet) = detection_from_announcement(&catalog, announcement) {
                    on_detection(wallet);
                }
            }),
        );
        debug!(event = %self.event, "listening for wallet announcements");
        id
    }
}

/// Turn an announcement into a detection.
///
/// The catalog descriptor is used when the id is known, otherwise one is
/// synthesized from the payload. Announcements with an empty id or without
/// an object as provider are dropped.
#[must_use]
pub fn detection_from_announcement(
    catalog: &Catalog,
    announcement: Announcement,
) -> Option<DetectedWallet> {
    let Announcement {
        id,
        provider,
        name,
        icon,
        website,
    } = announcement;

    if id.is_empty() {
        debug!("announcement without id ignored");
        return None;
    }
    let HostValue::Object(provider) = provider else {
        debug!(wallet = %id, "announcement without provider object ignored");
        return None;
    };

    let descriptor = catalog.get(&id).map_or_else(
        || {
            Arc::new(WalletDescriptor::ad_hoc(
                &id,
                name.as_deref(),
                icon.as_deref(),
                website.as_deref(),
            ))
        },
        Arc::clone,
    );

    Some(DetectedWallet::new(
        descriptor,
        provider,
        DetectionSource::Announcement,
    ))
}
