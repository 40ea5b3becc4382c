//! Capability manifest and the strategy tables it is resolved from.
//!
//! Each canonical operation has an ordered table of method spellings. The
//! manifest is resolved once, when the adapter is built: the first entry the
//! provider actually exposes wins. Supporting a new vendor spelling means
//! adding a row to a table.

use serde::Serialize;

use crate::host::InjectedObject;

/// Which object a method lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The injected provider itself.
    Provider,
    /// A nested object member of the provider.
    Member(&'static str),
}

/// One row of a strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Object the method is looked up on.
    pub target: Target,
    /// Method name.
    pub method: &'static str,
}

impl MethodRef {
    /// A method on the provider.
    #[must_use]
    pub const fn provider(method: &'static str) -> Self {
        Self {
            target: Target::Provider,
            method,
        }
    }

    /// A method on a nested member.
    #[must_use]
    pub const fn member(member: &'static str, method: &'static str) -> Self {
        Self {
            target: Target::Member(member),
            method,
        }
    }

    /// Whether the provider exposes this method right now.
    pub fn is_available(&self, provider: &dyn InjectedObject) -> bool {
        match self.target {
            Target::Provider => provider.has_method(self.method),
            Target::Member(name) => provider
                .member(name)
                .is_some_and(|member| member.has_method(self.method)),
        }
    }
}

/// Sign-in spellings.
pub const SIGN_IN: &[MethodRef] = &[
    MethodRef::provider("connect"),
    MethodRef::provider("signIn"),
    MethodRef::provider("requestSignIn"),
    MethodRef::provider("enable"),
];

/// Sign-out spellings.
pub const SIGN_OUT: &[MethodRef] = &[
    MethodRef::provider("disconnect"),
    MethodRef::provider("signOut"),
];

/// Account getters: multi-account, single id, account object.
pub const GET_ACCOUNTS: &[MethodRef] = &[
    MethodRef::provider("getAccounts"),
    MethodRef::provider("getAccountId"),
    MethodRef::provider("account"),
];

/// Data property read when no account getter answers.
pub const ACCOUNT_ID_PROPERTY: &str = "accountId";

/// Single transaction spellings, including the nested account object.
pub const SIGN_AND_SEND_TRANSACTION: &[MethodRef] = &[
    MethodRef::provider("signAndSendTransaction"),
    MethodRef::member("account", "signAndSendTransaction"),
    MethodRef::member("account", "signAndSendTransactionDirect"),
];

/// Batch transaction spellings.
pub const SIGN_AND_SEND_TRANSACTIONS: &[MethodRef] = &[
    MethodRef::provider("signAndSendTransactions"),
    MethodRef::provider("requestSignTransactions"),
];

/// Message signing, falling back to the ownership proof primitive.
pub const SIGN_MESSAGE: &[MethodRef] = &[
    MethodRef::provider("signMessage"),
    MethodRef::provider("verifyOwner"),
];

/// Ownership proof.
pub const VERIFY_OWNER: &[MethodRef] = &[MethodRef::provider("verifyOwner")];

/// Connection status queries.
pub const IS_CONNECTED: &[MethodRef] = &[
    MethodRef::provider("isSignedIn"),
    MethodRef::provider("isConnected"),
];

/// First available row of a table.
pub fn resolve(table: &[MethodRef], provider: &dyn InjectedObject) -> Option<MethodRef> {
    table.iter().copied().find(|m| m.is_available(provider))
}

/// Which canonical operations an adapter offers, for display by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Connect / sign in.
    pub sign_in: bool,
    /// Disconnect / sign out.
    pub sign_out: bool,
    /// Fetch accounts.
    pub get_accounts: bool,
    /// Sign and send one transaction.
    pub sign_and_send_transaction: bool,
    /// Sign and send several transactions (directly or sequentially).
    pub sign_and_send_transactions: bool,
    /// Sign a message.
    pub sign_message: bool,
    /// Prove account ownership.
    pub verify_owner: bool,
    /// Query connection status.
    pub is_connected: bool,
}

impl Capabilities {
    const ALL: Self = Self {
        sign_in: true,
        sign_out: true,
        get_accounts: true,
        sign_and_send_transaction: true,
        sign_and_send_transactions: true,
        sign_message: true,
        verify_owner: true,
        is_connected: true,
    };

    /// Canonical names of the enabled operations, in declaration order.
    #[must_use]
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            (self.sign_in, "signIn"),
            (self.sign_out, "signOut"),
            (self.get_accounts, "getAccounts"),
            (self.sign_and_send_transaction, "signAndSendTransaction"),
            (self.sign_and_send_transactions, "signAndSendTransactions"),
            (self.sign_message, "signMessage"),
            (self.verify_owner, "verifyOwner"),
            (self.is_connected, "isConnected"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Dispatch decisions for one wrapped provider, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityManifest {
    /// Sign-in method.
    pub sign_in: Option<MethodRef>,
    /// Sign-out method.
    pub sign_out: Option<MethodRef>,
    /// Available account getters, in priority order.
    pub get_accounts: Vec<MethodRef>,
    /// Single transaction method.
    pub sign_and_send_transaction: Option<MethodRef>,
    /// Batch transaction method.
    pub sign_and_send_transactions: Option<MethodRef>,
    /// Message signing method.
    pub sign_message: Option<MethodRef>,
    /// Ownership proof method.
    pub verify_owner: Option<MethodRef>,
    /// Connection status query.
    pub is_connected: Option<MethodRef>,
    /// Capability summary.
    pub capabilities: Capabilities,
}

impl CapabilityManifest {
    /// Resolve every strategy table against a provider.
    pub fn resolve(provider: &dyn InjectedObject) -> Self {
        let sign_in = resolve(SIGN_IN, provider);
        let sign_out = resolve(SIGN_OUT, provider);
        let get_accounts: Vec<MethodRef> = GET_ACCOUNTS
            .iter()
            .copied()
            .filter(|m| m.is_available(provider))
            .collect();
        let sign_and_send_transaction = resolve(SIGN_AND_SEND_TRANSACTION, provider);
        let sign_and_send_transactions = resolve(SIGN_AND_SEND_TRANSACTIONS, provider);
        let sign_message = resolve(SIGN_MESSAGE, provider);
        let verify_owner = resolve(VERIFY_OWNER, provider);
        let is_connected = resolve(IS_CONNECTED, provider);

        let capabilities = Capabilities {
            sign_in: sign_in.is_some(),
            sign_out: sign_out.is_some(),
            get_accounts: !get_accounts.is_empty()
                || provider.property(ACCOUNT_ID_PROPERTY).is_some(),
            sign_and_send_transaction: sign_and_send_transaction.is_some(),
            sign_and_send_transactions: sign_and_send_transactions.is_some()
                || sign_and_send_transaction.is_some(),
            sign_message: sign_message.is_some(),
            verify_owner: verify_owner.is_some(),
            is_connected: true,
        };

        Self {
            sign_in,
            sign_out,
            get_accounts,
            sign_and_send_transaction,
            sign_and_send_transactions,
            sign_message,
            verify_owner,
            is_connected,
            capabilities,
        }
    }

    /// Manifest for a channel-only wallet.
    ///
    /// The real capabilities live behind the sandboxed executor, so every
    /// operation is advertised while no method is dispatchable here.
    #[must_use]
    pub const fn channel_only() -> Self {
        Self {
            sign_in: None,
            sign_out: None,
            get_accounts: Vec::new(),
            sign_and_send_transaction: None,
            sign_and_send_transactions: None,
            sign_message: None,
            verify_owner: None,
            is_connected: None,
            capabilities: Capabilities::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;

    #[test]
    fn test_first_available_spelling_wins() {
        let provider = MockProvider::new()
            .method("enable")
            .method("requestSignIn")
            .method("signOut");
        let manifest = CapabilityManifest::resolve(&provider);
        assert_eq!(manifest.sign_in, Some(MethodRef::provider("requestSignIn")));
        assert_eq!(manifest.sign_out, Some(MethodRef::provider("signOut")));
    }

    #[test]
    fn test_enable_only_provider() {
        let provider = MockProvider::new().method("enable");
        let manifest = CapabilityManifest::resolve(&provider);

        assert_eq!(manifest.sign_in, Some(MethodRef::provider("enable")));
        assert!(manifest.sign_and_send_transaction.is_none());
        assert!(!manifest.capabilities.sign_and_send_transaction);
        assert!(!manifest.capabilities.sign_and_send_transactions);
        assert!(!manifest.capabilities.get_accounts);
        assert!(manifest.capabilities.is_connected);
        assert_eq!(manifest.capabilities.enabled(), vec!["signIn", "isConnected"]);
    }

    #[test]
    fn test_nested_account_object_methods() {
        let account = MockProvider::new().method("signAndSendTransactionDirect").shared();
        let provider = MockProvider::new().method("connect").member("account", account);
        let manifest = CapabilityManifest::resolve(&provider);

        assert_eq!(
            manifest.sign_and_send_transaction,
            Some(MethodRef::member("account", "signAndSendTransactionDirect"))
        );
        assert!(manifest.capabilities.sign_and_send_transactions);
    }

    #[test]
    fn test_account_getters_kept_in_order() {
        let provider = MockProvider::new()
            .method("account")
            .method("getAccounts");
        let manifest = CapabilityManifest::resolve(&provider);
        assert_eq!(
            manifest.get_accounts,
            vec![MethodRef::provider("getAccounts"), MethodRef::provider("account")]
        );
    }

    #[test]
    fn test_verify_owner_doubles_as_message_signer() {
        let provider = MockProvider::new().method("verifyOwner");
        let manifest = CapabilityManifest::resolve(&provider);
        assert_eq!(manifest.sign_message, Some(MethodRef::provider("verifyOwner")));
        assert_eq!(manifest.verify_owner, Some(MethodRef::provider("verifyOwner")));
    }

    #[test]
    fn test_channel_only_advertises_everything() {
        let manifest = CapabilityManifest::channel_only();
        assert_eq!(manifest.capabilities, Capabilities::ALL);
        assert!(manifest.sign_in.is_none());
    }
}
