//! One pass over the host's global namespace.
//!
//! Three strategies are applied per catalog entry, chosen by the entry's
//! traits:
//!
//! | Descriptor | Keys read | Acceptance test |
//! |---|---|---|
//! | aggregated | the shared provider array | capability probe |
//! | channel-only | primary, then alternates | any object |
//! | otherwise | primary, then alternates | capability probe |
//!
//! A failing getter only hides its own key; the pass carries on.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::catalog::{Catalog, WalletDescriptor};
use crate::host::{Host, HostValue, ProviderRef};
use crate::probe::is_plausible_provider;
use crate::registry::{DetectedWallet, DetectionSource};

/// Property names an aggregated-list entry may carry its identifier under.
const ENTRY_ID_FIELDS: &[&str] = &["id", "walletId"];

/// Stateless scanner over one host and catalog.
#[derive(Clone, Copy)]
pub struct GlobalScanner<'a> {
    host: &'a dyn Host,
    catalog: &'a Catalog,
    aggregated_list_key: &'a str,
}

impl std::fmt::Debug for GlobalScanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalScanner")
            .field("catalog", &self.catalog.len())
            .field("aggregated_list_key", &self.aggregated_list_key)
            .finish_non_exhaustive()
    }
}

impl<'a> GlobalScanner<'a> {
    /// Create a scanner.
    #[must_use]
    pub const fn new(host: &'a dyn Host, catalog: &'a Catalog, aggregated_list_key: &'a str) -> Self {
        Self {
            host,
            catalog,
            aggregated_list_key,
        }
    }

    /// Run one pass.
    ///
    /// `is_registered` is consulted before each descriptor so registered
    /// wallets are skipped; `register` receives every new detection in
    /// discovery order and reports whether it was inserted. Returns the
    /// number of insertions.
    pub fn scan(
        &self,
        is_registered: impl Fn(&str) -> bool,
        mut register: impl FnMut(DetectedWallet) -> bool,
    ) -> usize {
        let mut inserted = 0;
        let mut aggregated_done = false;

        for descriptor in self.catalog {
            if is_registered(&descriptor.id) {
                continue;
            }

            if descriptor.uses_aggregated_provider_list {
                if !aggregated_done {
                    aggregated_done = true;
                    inserted += self.scan_aggregated(&is_registered, &mut register);
                }
                continue;
            }

            let found = if descriptor.uses_channel_only {
                self.find_at_keys(descriptor, |value| value.as_object().is_some())
            } else {
                self.find_at_keys(descriptor, is_plausible_provider)
            };

            if let Some((provider, source)) = found
                && register(DetectedWallet::new(Arc::clone(descriptor), provider, source))
            {
                inserted += 1;
            }
        }

        trace!(inserted, "global scan pass complete");
        inserted
    }

    /// First key (primary wins) whose value passes `accept`.
    fn find_at_keys(
        &self,
        descriptor: &WalletDescriptor,
        accept: impl Fn(&HostValue) -> bool,
    ) -> Option<(ProviderRef, DetectionSource)> {
        for (index, key) in descriptor.keys().enumerate() {
            let Some(value) = self.read(key) else {
                continue;
            };
            if !accept(&value) {
                debug!(wallet = %descriptor.id, key, "global present but rejected");
                continue;
            }
            if let HostValue::Object(provider) = value {
                let source = if index == 0 && key == descriptor.global_key {
                    DetectionSource::GlobalKey
                } else {
                    DetectionSource::AlternateKey
                };
                return Some((provider, source));
            }
        }
        None
    }

    fn scan_aggregated(
        &self,
        is_registered: &impl Fn(&str) -> bool,
        register: &mut impl FnMut(DetectedWallet) -> bool,
    ) -> usize {
        let Some(HostValue::List(entries)) = self.read(self.aggregated_list_key) else {
            return 0;
        };

        let mut inserted = 0;
        for entry in &entries {
            let Some(object) = entry.as_object() else {
                continue;
            };
            let Some(id) = entry_id(object) else {
                debug!(key = self.aggregated_list_key, "aggregated entry without id skipped");
                continue;
            };
            if is_registered(&id) {
                continue;
            }

            let provider = object.member("provider").unwrap_or_else(|| Arc::clone(object));
            if !is_plausible_provider(&HostValue::Object(Arc::clone(&provider))) {
                debug!(wallet = %id, "aggregated entry rejected by capability probe");
                continue;
            }

            let descriptor = self.catalog.get(&id).map_or_else(
                || {
                    let name = object.property("name");
                    Arc::new(
                        WalletDescriptor::ad_hoc(&id, name.as_ref().and_then(Value::as_str), None, None)
                            .aggregated(),
                    )
                },
                Arc::clone,
            );

            if register(DetectedWallet::new(descriptor, provider, DetectionSource::AggregatedList)) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Read a global, isolating host failures and treating null as absent.
    fn read(&self, key: &str) -> Option<HostValue> {
        match self.host.global(key) {
            Ok(Some(value)) if !value.is_null() => Some(value),
            Ok(_) => None,
            Err(err) => {
                warn!(key, error = %err, "skipping global after host error");
                None
            }
        }
    }
}

fn entry_id(object: &ProviderRef) -> Option<String> {
    ENTRY_ID_FIELDS
        .iter()
        .filter_map(|field| object.property(field))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
}
