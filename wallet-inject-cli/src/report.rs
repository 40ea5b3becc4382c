//! Rendering of the detection result.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use wallet_inject::{Capabilities, DetectedWallet, DetectionSource, WalletAdapter};

/// One row of the "extension detected" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledWallet {
    /// Wallet identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Icon URL.
    pub icon: String,
    /// Website URL.
    pub website: String,
    /// False for channel-only wallets, which need the sandboxed executor.
    pub operable: bool,
    /// How the wallet was found.
    pub source: DetectionSource,
}

impl From<&DetectedWallet> for InstalledWallet {
    fn from(wallet: &DetectedWallet) -> Self {
        Self {
            id: wallet.descriptor.id.clone(),
            name: wallet.descriptor.name.clone(),
            icon: wallet.descriptor.icon.clone(),
            website: wallet.descriptor.website.clone(),
            operable: !wallet.is_channel_only(),
            source: wallet.source,
        }
    }
}

const fn source_label(source: DetectionSource) -> &'static str {
    match source {
        DetectionSource::GlobalKey => "global key",
        DetectionSource::AlternateKey => "alternate key",
        DetectionSource::AggregatedList => "aggregated list",
        DetectionSource::Announcement => "announcement",
    }
}

fn capabilities_of(adapters: &[Arc<WalletAdapter>], id: &str) -> Option<Capabilities> {
    adapters
        .iter()
        .find(|a| a.id() == id)
        .map(|a| a.capabilities())
}

/// Plain text table, one wallet per row.
#[must_use]
pub fn render_table(installed: &[InstalledWallet], adapters: &[Arc<WalletAdapter>]) -> String {
    if installed.is_empty() {
        return "no injected wallets detected\n".to_string();
    }

    let id_width = installed.iter().map(|w| w.id.len()).max().unwrap_or(0).max(2);
    let name_width = installed.iter().map(|w| w.name.len()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {:<15}  {:<8}  CAPABILITIES",
        "ID", "NAME", "SOURCE", "OPERABLE"
    );
    for wallet in installed {
        let capabilities = if wallet.operable {
            capabilities_of(adapters, &wallet.id)
                .map(|c| c.enabled().join(","))
                .unwrap_or_default()
        } else {
            "sandboxed executor".to_string()
        };
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<name_width$}  {:<15}  {:<8}  {}",
            wallet.id,
            wallet.name,
            source_label(wallet.source),
            if wallet.operable { "yes" } else { "no" },
            capabilities,
        );
    }
    out
}

/// JSON array of installed wallets with their capability summaries.
pub fn render_json(
    installed: &[InstalledWallet],
    adapters: &[Arc<WalletAdapter>],
) -> serde_json::Result<String> {
    let rows: Vec<Value> = installed
        .iter()
        .map(|wallet| {
            json!({
                "wallet": wallet,
                "capabilities": capabilities_of(adapters, &wallet.id),
            })
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
