//! Static wallet metadata.
//!
//! A [`Catalog`] lists the wallets the detector knows how to look for. Each
//! [`WalletDescriptor`] names the global keys its wallet injects under and
//! how the injected object should be treated. Wallets that announce
//! themselves without a catalog entry get an ad-hoc descriptor synthesized
//! from whatever they reported.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Vendor-authored metadata for one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDescriptor {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon URL.
    #[serde(default)]
    pub icon: String,
    /// Website URL.
    #[serde(default)]
    pub website: String,
    /// Primary global key the wallet injects under.
    #[serde(default)]
    pub global_key: String,
    /// Alternate keys, probed in order after the primary one.
    #[serde(default)]
    pub alternate_keys: Vec<String>,
    /// The provider lives in the shared aggregated array instead of its own key.
    #[serde(default)]
    pub uses_aggregated_provider_list: bool,
    /// The injected object is a message channel, not an operable provider.
    #[serde(default)]
    pub uses_channel_only: bool,
}

impl WalletDescriptor {
    /// Create a descriptor probed at a single global key.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        global_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            website: String::new(),
            global_key: global_key.into(),
            alternate_keys: Vec::new(),
            uses_aggregated_provider_list: false,
            uses_channel_only: false,
        }
    }

    /// Synthesize a descriptor for a wallet with no catalog entry.
    ///
    /// Missing names fall back to the identifier.
    #[must_use]
    pub fn ad_hoc(
        id: &str,
        name: Option<&str>,
        icon: Option<&str>,
        website: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.filter(|n| !n.is_empty()).unwrap_or(id).to_string(),
            icon: icon.unwrap_or_default().to_string(),
            website: website.unwrap_or_default().to_string(),
            global_key: String::new(),
            alternate_keys: Vec::new(),
            uses_aggregated_provider_list: false,
            uses_channel_only: false,
        }
    }

    /// Set the icon URL.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the website URL.
    #[must_use]
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// Append an alternate global key.
    #[must_use]
    pub fn alternate_key(mut self, key: impl Into<String>) -> Self {
        self.alternate_keys.push(key.into());
        self
    }

    /// Mark the wallet as living in the aggregated provider list.
    #[must_use]
    pub const fn aggregated(mut self) -> Self {
        self.uses_aggregated_provider_list = true;
        self
    }

    /// Mark the wallet as channel-only.
    #[must_use]
    pub const fn channel_only(mut self) -> Self {
        self.uses_channel_only = true;
        self
    }

    /// Primary key followed by alternates, skipping empty keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.global_key.as_str())
            .chain(self.alternate_keys.iter().map(String::as_str))
            .filter(|key| !key.is_empty())
    }
}

/// An immutable list of known wallets.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    descriptors: Vec<Arc<WalletDescriptor>>,
}

impl Catalog {
    /// Create a catalog from descriptors.
    ///
    /// Later descriptors reusing an earlier identifier are dropped.
    #[must_use]
    pub fn new(descriptors: impl IntoIterator<Item = WalletDescriptor>) -> Self {
        let mut out: Vec<Arc<WalletDescriptor>> = Vec::new();
        for descriptor in descriptors {
            if out.iter().all(|d| d.id != descriptor.id) {
                out.push(Arc::new(descriptor));
            }
        }
        Self { descriptors: out }
    }

    /// Parse a catalog from a JSON array of descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a list of descriptors.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let descriptors: Vec<WalletDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(descriptors))
    }

    /// Look up a descriptor by wallet identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<WalletDescriptor>> {
        self.descriptors.iter().find(|d| d.id == id)
    }

    /// Iterate over all descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<WalletDescriptor>> {
        self.descriptors.iter()
    }

    /// Number of descriptors.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The built-in catalog of known injected wallets.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            WalletDescriptor::new("sender", "Sender", "sender")
                .alternate_key("near")
                .icon("https://sender.org/logo.png")
                .website("https://sender.org"),
            WalletDescriptor::new("meteor-wallet", "Meteor Wallet", "meteorWallet")
                .alternate_key("meteor")
                .icon("https://wallet.meteorwallet.app/assets/logo.svg")
                .website("https://meteorwallet.app"),
            WalletDescriptor::new("here-wallet", "HERE Wallet", "hereWallet")
                .alternate_key("here")
                .icon("https://herewallet.app/logo.svg")
                .website("https://herewallet.app"),
            WalletDescriptor::new("nightly", "Nightly", "nightlyNear")
                .alternate_key("nightly")
                .icon("https://nightly.app/logo.png")
                .website("https://nightly.app"),
            WalletDescriptor::new("okx-wallet", "OKX Wallet", "okxwallet")
                .alternate_key("okxNear")
                .icon("https://static.okx.com/cdn/assets/imgs/logo.png")
                .website("https://www.okx.com/web3"),
            WalletDescriptor::new("coin98-wallet", "Coin98 Wallet", "coin98")
                .icon("https://coin98.com/logo.png")
                .website("https://coin98.com"),
            WalletDescriptor::new("welldone-wallet", "WELLDONE Wallet", "")
                .aggregated()
                .website("https://welldonestudio.io"),
            WalletDescriptor::new("math-wallet", "Math Wallet", "")
                .aggregated()
                .website("https://mathwallet.org"),
            WalletDescriptor::new("hot-wallet", "HOT Wallet", "hotWalletChannel")
                .alternate_key("hotWallet")
                .channel_only()
                .icon("https://hot-labs.org/logo.png")
                .website("https://hot-labs.org"),
        ])
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Arc<WalletDescriptor>;
    type IntoIter = std::slice::Iter<'a, Arc<WalletDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.iter().map(|d| d.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_keys_primary_first_and_skips_empty() {
        let descriptor = WalletDescriptor::new("x", "X", "primary")
            .alternate_key("")
            .alternate_key("alt");
        let keys: Vec<_> = descriptor.keys().collect();
        assert_eq!(keys, vec!["primary", "alt"]);
    }

    #[test]
    fn test_ad_hoc_falls_back_to_id() {
        let descriptor = WalletDescriptor::ad_hoc("mystery", None, None, None);
        assert_eq!(descriptor.name, "mystery");
        assert!(!descriptor.uses_channel_only);

        let named = WalletDescriptor::ad_hoc("mystery", Some("Mystery"), Some("i.png"), None);
        assert_eq!(named.name, "Mystery");
        assert_eq!(named.icon, "i.png");
    }

    #[test]
    fn test_from_json_and_duplicates_dropped() {
        let json = r#"[
            {"id": "a", "name": "A", "globalKey": "walletA", "alternateKeys": ["a"]},
            {"id": "b", "name": "B", "usesChannelOnly": true, "globalKey": "b"},
            {"id": "a", "name": "Shadow", "globalKey": "shadow"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().name, "A");
        assert!(catalog.get("b").unwrap().uses_channel_only);
        assert!(catalog.get("c").is_none());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Catalog::from_json("{\"id\": 1}").is_err());
    }
}
