//! Error types for wallet detection and adapter operations.
//!
//! Three error types:
//! - [`WalletError`] is what adapter operations return to the host application
//! - [`ProviderError`] is a rejection raised by the wrapped wallet itself
//! - [`HostError`] is a failure while reading the host's global namespace

use std::fmt;

use serde_json::Value;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, WalletError>;

/// A canonical adapter operation, used to name what was attempted in errors
/// and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Connect / sign in.
    SignIn,
    /// Disconnect / sign out.
    SignOut,
    /// Fetch connected accounts.
    GetAccounts,
    /// Sign and send one transaction.
    SignAndSendTransaction,
    /// Sign and send a batch of transactions.
    SignAndSendTransactions,
    /// Sign an arbitrary message.
    SignMessage,
    /// Produce an ownership proof.
    VerifyOwner,
    /// Query connection status.
    IsConnected,
}

impl Operation {
    /// Stable snake-case name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignOut => "sign_out",
            Self::GetAccounts => "get_accounts",
            Self::SignAndSendTransaction => "sign_and_send_transaction",
            Self::SignAndSendTransactions => "sign_and_send_transactions",
            Self::SignMessage => "sign_message",
            Self::VerifyOwner => "verify_owner",
            Self::IsConnected => "is_connected",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by adapter operations.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum WalletError {
    /// The wallet exposes none of the recognized method shapes for the operation.
    #[error("wallet '{wallet}' does not support {operation}")]
    Unsupported {
        /// The attempted operation.
        operation: Operation,
        /// Identifier of the wallet.
        wallet: String,
    },

    /// The wallet only exposes a message channel and must be driven through
    /// the sandboxed executor.
    #[error(
        "wallet '{wallet}' only exposes a communication channel; use the sandboxed executor instead"
    )]
    ChannelOnly {
        /// Identifier of the wallet.
        wallet: String,
    },

    /// The wallet's own call rejected. Passed through unchanged.
    #[error(transparent)]
    Delegated(#[from] ProviderError),
}

impl WalletError {
    /// Create an unsupported-operation error.
    #[must_use]
    pub fn unsupported(operation: Operation, wallet: impl Into<String>) -> Self {
        Self::Unsupported {
            operation,
            wallet: wallet.into(),
        }
    }

    /// Create a channel-only restriction error.
    #[must_use]
    pub fn channel_only(wallet: impl Into<String>) -> Self {
        Self::ChannelOnly {
            wallet: wallet.into(),
        }
    }

    /// Whether this error came from the wrapped wallet rather than from
    /// the adapter's own dispatch.
    #[must_use]
    pub const fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated(_))
    }
}

/// A rejection raised by the wrapped wallet.
///
/// Wallets reject with arbitrary payloads; the message is kept for display
/// and the raw payload, if any, is preserved in `data`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Human-readable message reported by the wallet.
    pub message: String,
    /// Raw rejection payload, when the wallet supplied one.
    pub data: Option<Value>,
}

impl ProviderError {
    /// Create a provider error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// Attach the raw rejection payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<String> for ProviderError {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProviderError {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A failure raised by the host while inspecting a global.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to read global '{key}': {message}")]
pub struct HostError {
    /// The global key being read.
    pub key: String,
    /// Reason reported by the host.
    pub message: String,
}

impl HostError {
    /// Create a host error for a key.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}
