//! Discovery and normalization of injected browser wallets.
//!
//! Browser wallet extensions inject a provider object into the page, each
//! under its own global key, with its own method spellings. This crate finds
//! them and wraps each one in a [`WalletAdapter`] exposing one canonical
//! operation set.
//!
//! The host environment is abstracted behind the [`Host`] trait; injected
//! objects behind [`InjectedObject`]. The [`mock`] module provides scriptable
//! implementations of both, used by the tests and the `wallet-inject` CLI.
//!
//! ```ignore
//! use std::sync::Arc;
//! use wallet_inject::prelude::*;
//!
//! let detector = Detector::new(host);
//! for wallet in detector.detect_default().await {
//!     let adapter = WalletAdapter::new(wallet);
//!     let accounts = adapter.sign_in(&SignInParams::default()).await?;
//! }
//! ```

pub mod adapter;
pub mod catalog;
pub mod config;
pub mod detector;
pub mod error;
pub mod events;
pub mod host;
pub mod mock;
pub mod prelude;
pub mod probe;
pub mod registry;
pub mod scanner;

pub use adapter::{
    Account, Capabilities, CapabilityManifest, SignInParams, SignMessageParams, WalletAdapter,
    normalize_accounts,
};
pub use catalog::{Catalog, WalletDescriptor};
pub use config::DetectorConfig;
pub use detector::{Detector, Subscription};
pub use error::{HostError, Operation, ProviderError, Result, WalletError};
pub use host::{Announcement, Host, HostValue, InjectedObject, ProviderRef};
pub use probe::is_plausible_provider;
pub use registry::{DetectedWallet, DetectionSource};
