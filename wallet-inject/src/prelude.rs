//! Common imports.

pub use crate::adapter::{Account, SignInParams, SignMessageParams, WalletAdapter};
pub use crate::catalog::{Catalog, WalletDescriptor};
pub use crate::config::DetectorConfig;
pub use crate::detector::Detector;
pub use crate::error::{Result, WalletError};
pub use crate::host::{Announcement, Host, HostValue, InjectedObject};
pub use crate::registry::DetectedWallet;
