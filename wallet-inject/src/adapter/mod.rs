//! Canonical operations over one detected wallet.
//!
//! # Architecture
//!
//! ```text
//! WalletAdapter (DetectedWallet + CapabilityManifest + cached accounts)
//!   ├── sign_in()                    → connect | signIn | requestSignIn | enable
//!   ├── sign_out()                   → disconnect | signOut | no-op
//!   ├── get_accounts()               → getAccounts | getAccountId | account | .accountId | cache
//!   ├── sign_and_send_transaction()  → direct | account.* nested
//!   ├── sign_and_send_transactions() → batch | alternate batch | sequential
//!   ├── sign_message()               → signMessage | verifyOwner
//!   ├── verify_owner()               → verifyOwner
//!   └── is_connected()               → isSignedIn | isConnected | cache
//! ```
//!
//! Dispatch goes through the manifest resolved at construction, never by
//! re-probing the provider. Channel-only wallets reject every delegated
//! operation before the wrapped object is touched.

mod accounts;
mod manifest;

pub use accounts::{ACCOUNT_ID_FIELDS, Account, PUBLIC_KEY_FIELDS, normalize_accounts};
pub use manifest::{Capabilities, CapabilityManifest, MethodRef, Target};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::catalog::WalletDescriptor;
use crate::error::{Operation, Result, WalletError};
use crate::registry::DetectedWallet;

/// Parameters for [`WalletAdapter::sign_in`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInParams {
    /// Contract the access key is requested for.
    pub contract_id: Option<String>,
    /// Methods the access key may call; empty means any.
    pub method_names: Vec<String>,
}

impl SignInParams {
    /// Request access for a contract.
    pub fn contract(contract_id: impl Into<String>) -> Self {
        Self {
            contract_id: Some(contract_id.into()),
            method_names: Vec::new(),
        }
    }

    /// Restrict the methods the access key may call.
    #[must_use]
    pub fn methods(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.method_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// The argument object passed to the wallet. Unset fields are omitted.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut args = Map::new();
        if let Some(contract_id) = &self.contract_id {
            args.insert("contractId".to_string(), json!(contract_id));
        }
        if !self.method_names.is_empty() {
            args.insert("methodNames".to_string(), json!(self.method_names));
        }
        Value::Object(args)
    }
}

/// Parameters for [`WalletAdapter::sign_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignMessageParams {
    /// Message to sign.
    pub message: String,
    /// Intended recipient of the signature.
    pub recipient: String,
    /// Replay-protection nonce.
    pub nonce: Vec<u8>,
    /// Where browser-redirect wallets send the result.
    pub callback_url: Option<String>,
}

impl SignMessageParams {
    /// The argument object passed to the wallet.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut args = json!({
            "message": self.message,
            "recipient": self.recipient,
            "nonce": self.nonce,
        });
        if let (Some(url), Value::Object(map)) = (&self.callback_url, &mut args) {
            map.insert("callbackUrl".to_string(), json!(url));
        }
        args
    }
}

/// Normalized interface over one detected wallet.
#[derive(Debug)]
pub struct WalletAdapter {
    wallet: DetectedWallet,
    manifest: CapabilityManifest,
    accounts: Mutex<Vec<Account>>,
}

impl WalletAdapter {
    /// Wrap a detected wallet, resolving its manifest.
    #[must_use]
    pub fn new(wallet: DetectedWallet) -> Self {
        let manifest = if wallet.is_channel_only() {
            CapabilityManifest::channel_only()
        } else {
            CapabilityManifest::resolve(wallet.provider.as_ref())
        };
        debug!(
            wallet = %wallet.id(),
            capabilities = ?manifest.capabilities,
            "adapter created"
        );
        Self {
            wallet,
            manifest,
            accounts: Mutex::new(Vec::new()),
        }
    }

    /// Wallet identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.wallet.id()
    }

    /// Wallet metadata.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<WalletDescriptor> {
        &self.wallet.descriptor
    }

    /// The wrapped detection.
    #[must_use]
    pub const fn wallet(&self) -> &DetectedWallet {
        &self.wallet
    }

    /// Resolved dispatch decisions.
    #[must_use]
    pub const fn manifest(&self) -> &CapabilityManifest {
        &self.manifest
    }

    /// Capability summary.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.manifest.capabilities
    }

    /// Whether operations must go through the sandboxed executor.
    #[must_use]
    pub fn is_channel_only(&self) -> bool {
        self.wallet.is_channel_only()
    }

    /// Last known accounts; empty when unknown or disconnected.
    #[must_use]
    pub fn cached_accounts(&self) -> Vec<Account> {
        self.cache().clone()
    }

    /// Connect to the wallet.
    ///
    /// Returns the connected accounts, asking the account getters when the
    /// sign-in response itself carries none.
    pub async fn sign_in(&self, params: &SignInParams) -> Result<Vec<Account>> {
        self.ensure_operable()?;
        let method = self.require(self.manifest.sign_in, Operation::SignIn)?;

        let response = self
            .invoke(Operation::SignIn, method, vec![params.to_json()])
            .await?;

        let mut accounts = normalize_accounts(&response);
        if accounts.is_empty() {
            accounts = self.get_accounts().await;
        } else {
            self.cache().clone_from(&accounts);
        }

        info!(wallet = %self.id(), accounts = accounts.len(), "signed in");
        Ok(accounts)
    }

    /// Disconnect from the wallet. Succeeds silently when the wallet has no
    /// sign-out method.
    pub async fn sign_out(&self) -> Result<()> {
        if let Some(method) = self.manifest.sign_out {
            self.invoke(Operation::SignOut, method, Vec::new()).await?;
        } else {
            debug!(wallet = %self.id(), "no sign-out method, treating as signed out");
        }
        self.cache().clear();
        Ok(())
    }

    /// Fetch the connected accounts.
    ///
    /// Getters are tried in manifest order, then the `accountId` property;
    /// a getter that fails or returns nothing usable is skipped. The first
    /// non-empty answer replaces the cache; if none answers the cache is
    /// returned.
    pub async fn get_accounts(&self) -> Vec<Account> {
        if self.is_channel_only() {
            return self.cached_accounts();
        }

        for &method in &self.manifest.get_accounts {
            match self.invoke(Operation::GetAccounts, method, Vec::new()).await {
                Ok(response) => {
                    let accounts = normalize_accounts(&response);
                    if !accounts.is_empty() {
                        self.cache().clone_from(&accounts);
                        return accounts;
                    }
                    debug!(wallet = %self.id(), method = method.method, "account getter returned nothing usable");
                }
                Err(err) => {
                    debug!(wallet = %self.id(), method = method.method, error = %err, "account getter failed");
                }
            }
        }

        if let Some(value) = self.wallet.provider.property(manifest::ACCOUNT_ID_PROPERTY) {
            let accounts = normalize_accounts(&value);
            if !accounts.is_empty() {
                self.cache().clone_from(&accounts);
                return accounts;
            }
        }

        self.cached_accounts()
    }

    /// Sign and send one transaction, returning the wallet's outcome.
    pub async fn sign_and_send_transaction(&self, transaction: Value) -> Result<Value> {
        self.ensure_operable()?;
        let method = self.require(
            self.manifest.sign_and_send_transaction,
            Operation::SignAndSendTransaction,
        )?;
        self.invoke(Operation::SignAndSendTransaction, method, vec![transaction])
            .await
    }

    /// Sign and send several transactions, one outcome per input, in order.
    ///
    /// Without a batch method the transactions are sent one by one. The
    /// first failure aborts the rest; transactions already sent stay sent.
    pub async fn sign_and_send_transactions(&self, transactions: Vec<Value>) -> Result<Vec<Value>> {
        self.ensure_operable()?;

        if let Some(method) = self.manifest.sign_and_send_transactions {
            let args = vec![json!({ "transactions": transactions })];
            let response = self
                .invoke(Operation::SignAndSendTransactions, method, args)
                .await?;
            return Ok(match response {
                Value::Array(outcomes) => outcomes,
                other => vec![other],
            });
        }

        if self.manifest.sign_and_send_transaction.is_none() {
            return Err(WalletError::unsupported(
                Operation::SignAndSendTransactions,
                self.id(),
            ));
        }

        debug!(wallet = %self.id(), count = transactions.len(), "no batch method, sending sequentially");
        let mut outcomes = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            outcomes.push(self.sign_and_send_transaction(transaction).await?);
        }
        Ok(outcomes)
    }

    /// Sign a message, falling back to the ownership proof primitive.
    pub async fn sign_message(&self, params: &SignMessageParams) -> Result<Value> {
        self.ensure_operable()?;
        let method = self.require(self.manifest.sign_message, Operation::SignMessage)?;
        self.invoke(Operation::SignMessage, method, vec![params.to_json()])
            .await
    }

    /// Ask the wallet for an ownership proof over `message`.
    pub async fn verify_owner(&self, message: &str) -> Result<Value> {
        self.ensure_operable()?;
        let method = self.require(self.manifest.verify_owner, Operation::VerifyOwner)?;
        self.invoke(Operation::VerifyOwner, method, vec![json!({ "message": message })])
            .await
    }

    /// Whether the wallet is connected. Never fails: without an answer from
    /// the wallet, a non-empty account cache counts as connected.
    pub async fn is_connected(&self) -> bool {
        if let Some(method) = self.manifest.is_connected {
            match self.invoke(Operation::IsConnected, method, Vec::new()).await {
                Ok(value) => return is_truthy(&value),
                Err(err) => {
                    debug!(wallet = %self.id(), error = %err, "status query failed, using cache");
                }
            }
        }
        !self.cache().is_empty()
    }

    fn ensure_operable(&self) -> Result<()> {
        if self.is_channel_only() {
            return Err(WalletError::channel_only(self.id()));
        }
        Ok(())
    }

    fn require(&self, method: Option<MethodRef>, operation: Operation) -> Result<MethodRef> {
        method.ok_or_else(|| WalletError::unsupported(operation, self.id()))
    }

    async fn invoke(&self, operation: Operation, method: MethodRef, args: Vec<Value>) -> Result<Value> {
        let target = match method.target {
            Target::Provider => Arc::clone(&self.wallet.provider),
            Target::Member(name) => self
                .wallet
                .provider
                .member(name)
                .ok_or_else(|| WalletError::unsupported(operation, self.id()))?,
        };
        debug!(wallet = %self.id(), %operation, method = method.method, "dispatching");
        Ok(target.call(method.method, args).await?)
    }

    fn cache(&self) -> MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Loose truthiness for wallets that answer status queries with non-booleans.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::host::ProviderRef;
    use crate::mock::MockProvider;
    use crate::registry::DetectionSource;
    use tokio_test::{assert_err, assert_ok};

    fn adapter_over(mock: &Arc<MockProvider>) -> WalletAdapter {
        let provider: ProviderRef = Arc::clone(mock) as ProviderRef;
        WalletAdapter::new(DetectedWallet::new(
            Arc::new(WalletDescriptor::new("test-wallet", "Test", "testWallet")),
            provider,
            DetectionSource::GlobalKey,
        ))
    }

    fn channel_adapter(mock: &Arc<MockProvider>) -> WalletAdapter {
        WalletAdapter::new(DetectedWallet::new(
            Arc::new(WalletDescriptor::new("hot-wallet", "HOT", "hotChannel").channel_only()),
            Arc::clone(mock) as ProviderRef,
            DetectionSource::GlobalKey,
        ))
    }

    #[tokio::test]
    async fn test_enable_only_provider() {
        let mock = Arc::new(MockProvider::new().returns("enable", json!(["alice.near"])));
        let adapter = adapter_over(&mock);

        let accounts = assert_ok!(adapter.sign_in(&SignInParams::contract("app.near")).await);
        assert_eq!(accounts, vec![Account::new("alice.near")]);
        assert_eq!(mock.called_methods(), vec!["enable"]);
        assert_eq!(mock.calls()[0].args, vec![json!({"contractId": "app.near"})]);

        let err = assert_err!(adapter.sign_and_send_transaction(json!({"receiverId": "x"})).await);
        assert!(matches!(
            err,
            WalletError::Unsupported {
                operation: Operation::SignAndSendTransaction,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_sign_in_prefers_connect_and_falls_back_to_getters() {
        let mock = Arc::new(
            MockProvider::new()
                .method("enable")
                .method("connect")
                .returns("getAccountId", json!("bob.near")),
        );
        let adapter = adapter_over(&mock);

        let accounts = adapter.sign_in(&SignInParams::default()).await.unwrap();
        assert_eq!(accounts, vec![Account::new("bob.near")]);
        assert_eq!(mock.called_methods(), vec!["connect", "getAccountId"]);
        assert_eq!(adapter.cached_accounts(), accounts);
    }

    #[tokio::test]
    async fn test_sign_in_rejection_is_passed_through() {
        let mock = Arc::new(MockProvider::new().fails("requestSignIn", "User rejected"));
        let adapter = adapter_over(&mock);

        let err = adapter.sign_in(&SignInParams::default()).await.unwrap_err();
        assert!(matches!(&err, WalletError::Delegated(ProviderError { message, .. }) if message == "User rejected"));
        assert!(adapter.cached_accounts().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_unsupported() {
        let mock = Arc::new(MockProvider::new().method("isConnected"));
        let adapter = adapter_over(&mock);
        let err = adapter.sign_in(&SignInParams::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "wallet 'test-wallet' does not support sign_in");
    }

    #[tokio::test]
    async fn test_channel_only_rejects_without_touching_object() {
        let mock = Arc::new(MockProvider::new().method("connect").method("signAndSendTransaction"));
        let adapter = channel_adapter(&mock);

        assert!(matches!(
            adapter.sign_in(&SignInParams::default()).await,
            Err(WalletError::ChannelOnly { .. })
        ));
        assert!(matches!(
            adapter.sign_and_send_transactions(vec![json!({})]).await,
            Err(WalletError::ChannelOnly { .. })
        ));
        assert!(matches!(
            adapter.verify_owner("hi").await,
            Err(WalletError::ChannelOnly { .. })
        ));
        assert!(adapter.get_accounts().await.is_empty());
        assert!(!adapter.is_connected().await);
        assert_ok!(adapter.sign_out().await);

        assert!(mock.calls().is_empty());
        assert_eq!(adapter.capabilities(), CapabilityManifest::channel_only().capabilities);
    }

    #[tokio::test]
    async fn test_sign_out_without_method_is_noop() {
        let mock = Arc::new(MockProvider::new().returns("connect", json!("a.near")));
        let adapter = adapter_over(&mock);
        adapter.sign_in(&SignInParams::default()).await.unwrap();
        assert!(adapter.is_connected().await);

        assert_ok!(adapter.sign_out().await);
        assert!(adapter.cached_accounts().is_empty());
        assert!(!adapter.is_connected().await);
    }

    #[tokio::test]
    async fn test_sign_out_dispatches_disconnect_first() {
        let mock = Arc::new(MockProvider::new().method("signOut").method("disconnect"));
        let adapter = adapter_over(&mock);
        adapter.sign_out().await.unwrap();
        assert_eq!(mock.called_methods(), vec!["disconnect"]);
    }

    #[tokio::test]
    async fn test_get_accounts_chain_and_cache() {
        let mock = Arc::new(
            MockProvider::new()
                .fails("getAccounts", "locked")
                .returns("getAccountId", json!(null))
                .returns(
                    "account",
                    json!({"accountId": "carol.near", "publicKey": "ed25519:K"}),
                ),
        );
        let adapter = adapter_over(&mock);

        let accounts = adapter.get_accounts().await;
        assert_eq!(
            accounts,
            vec![Account::new("carol.near").with_public_key("ed25519:K")]
        );
        assert_eq!(
            mock.called_methods(),
            vec!["getAccounts", "getAccountId", "account"]
        );
        assert_eq!(adapter.cached_accounts(), accounts);
    }

    #[tokio::test]
    async fn test_get_accounts_reads_property_then_cache() {
        let with_field = Arc::new(
            MockProvider::new()
                .method("isSignedIn")
                .property("accountId", json!("dave.near")),
        );
        let adapter = adapter_over(&with_field);
        assert_eq!(adapter.get_accounts().await, vec![Account::new("dave.near")]);

        let mock = Arc::new(
            MockProvider::new()
                .returns("connect", json!({"accounts": [{"account_id": "erin.near"}]}))
                .returns("getAccountId", json!(42)),
        );
        let adapter = adapter_over(&mock);
        adapter.sign_in(&SignInParams::default()).await.unwrap();
        assert_eq!(adapter.get_accounts().await, vec![Account::new("erin.near")]);
    }

    #[tokio::test]
    async fn test_nested_account_object_transaction() {
        let account = Arc::new(
            MockProvider::new().returns("signAndSendTransaction", json!({"transaction": {"hash": "abc"}})),
        );
        let mock = Arc::new(
            MockProvider::new()
                .method("connect")
                .member("account", Arc::clone(&account) as ProviderRef),
        );
        let adapter = adapter_over(&mock);

        let outcome = adapter
            .sign_and_send_transaction(json!({"receiverId": "app.near", "actions": []}))
            .await
            .unwrap();
        assert_eq!(outcome["transaction"]["hash"], "abc");
        assert_eq!(account.call_count("signAndSendTransaction"), 1);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_batch_method_used_when_present() {
        let mock = Arc::new(
            MockProvider::new()
                .method("signAndSendTransaction")
                .returns("requestSignTransactions", json!([{"id": 1}, {"id": 2}])),
        );
        let adapter = adapter_over(&mock);

        let outcomes = adapter
            .sign_and_send_transactions(vec![json!({"n": 1}), json!({"n": 2})])
            .await
            .unwrap();
        assert_eq!(outcomes, vec![json!({"id": 1}), json!({"id": 2})]);
        assert_eq!(mock.called_methods(), vec!["requestSignTransactions"]);
        assert_eq!(
            mock.calls()[0].args,
            vec![json!({"transactions": [{"n": 1}, {"n": 2}]})]
        );
    }

    #[tokio::test]
    async fn test_batch_non_array_response_is_one_outcome() {
        let mock = Arc::new(MockProvider::new().returns("signAndSendTransactions", json!("ok")));
        let adapter = adapter_over(&mock);
        let outcomes = adapter.sign_and_send_transactions(vec![json!({})]).await.unwrap();
        assert_eq!(outcomes, vec![json!("ok")]);
    }

    #[tokio::test]
    async fn test_sequential_fallback_preserves_order() {
        let mock = Arc::new(MockProvider::new().queue(
            "signAndSendTransaction",
            [Ok(json!("h1")), Ok(json!("h2")), Ok(json!("h3"))],
        ));
        let adapter = adapter_over(&mock);

        let outcomes = adapter
            .sign_and_send_transactions(vec![json!(1), json!(2), json!(3)])
            .await
            .unwrap();
        assert_eq!(outcomes, vec![json!("h1"), json!("h2"), json!("h3")]);
        let sent: Vec<Value> = mock.calls().into_iter().map(|c| c.args[0].clone()).collect();
        assert_eq!(sent, vec![json!(1), json!(2), json!(3)]);
    }

    #[tokio::test]
    async fn test_sequential_fallback_fails_fast() {
        let mock = Arc::new(MockProvider::new().queue(
            "signAndSendTransaction",
            [Ok(json!("h1")), Err(ProviderError::new("insufficient balance"))],
        ));
        let adapter = adapter_over(&mock);

        let err = adapter
            .sign_and_send_transactions(vec![json!(1), json!(2), json!(3)])
            .await
            .unwrap_err();
        assert!(err.is_delegated());
        assert_eq!(err.to_string(), "insufficient balance");
        // The first transaction went out; the third was never attempted.
        assert_eq!(mock.call_count("signAndSendTransaction"), 2);
    }

    #[tokio::test]
    async fn test_batch_unsupported_without_any_transaction_method() {
        let mock = Arc::new(MockProvider::new().method("connect"));
        let adapter = adapter_over(&mock);
        let err = adapter.sign_and_send_transactions(vec![json!(1)]).await.unwrap_err();
        assert!(matches!(
            err,
            WalletError::Unsupported {
                operation: Operation::SignAndSendTransactions,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_sign_message_falls_back_to_verify_owner() {
        let mock = Arc::new(MockProvider::new().returns("verifyOwner", json!({"signature": "sig"})));
        let adapter = adapter_over(&mock);
        let params = SignMessageParams {
            message: "hello".into(),
            recipient: "app.near".into(),
            nonce: vec![0; 4],
            callback_url: None,
        };

        let signed = adapter.sign_message(&params).await.unwrap();
        assert_eq!(signed["signature"], "sig");
        assert_eq!(mock.called_methods(), vec!["verifyOwner"]);
        assert_eq!(mock.calls()[0].args[0]["recipient"], "app.near");

        let proof = adapter.verify_owner("hello").await.unwrap();
        assert_eq!(proof["signature"], "sig");
        assert_eq!(mock.calls()[1].args, vec![json!({"message": "hello"})]);
    }

    #[tokio::test]
    async fn test_sign_message_unsupported() {
        let mock = Arc::new(MockProvider::new().method("connect"));
        let adapter = adapter_over(&mock);
        let params = SignMessageParams {
            message: "m".into(),
            recipient: "r".into(),
            nonce: Vec::new(),
            callback_url: None,
        };
        assert!(matches!(
            adapter.sign_message(&params).await,
            Err(WalletError::Unsupported { .. })
        ));
    }

    #[tokio::test]
    async fn test_is_connected_dispatch_and_fallback() {
        let signed_in = Arc::new(MockProvider::new().returns("isSignedIn", json!(true)).method("isConnected"));
        assert!(adapter_over(&signed_in).is_connected().await);
        assert_eq!(signed_in.called_methods(), vec!["isSignedIn"]);

        let truthy = Arc::new(MockProvider::new().returns("isConnected", json!(1)));
        assert!(adapter_over(&truthy).is_connected().await);

        let broken = Arc::new(MockProvider::new().fails("isConnected", "boom"));
        assert!(!adapter_over(&broken).is_connected().await);

        let none = Arc::new(MockProvider::new().method("connect"));
        assert!(!adapter_over(&none).is_connected().await);
    }

    #[test]
    fn test_sign_in_args_omit_unset_fields() {
        assert_eq!(SignInParams::default().to_json(), json!({}));
        assert_eq!(
            SignInParams::contract("app.near")
                .methods(["add_message"])
                .to_json(),
            json!({"contractId": "app.near", "methodNames": ["add_message"]})
        );
    }

    #[tokio::test]
    async fn test_sign_message_args_carry_every_field() {
        let mock = Arc::new(MockProvider::new().method("signMessage"));
        let adapter = adapter_over(&mock);
        let params = SignMessageParams {
            message: "login".into(),
            recipient: "app.near".into(),
            nonce: vec![1, 2, 3],
            callback_url: Some("https://app.example/cb".into()),
        };

        assert_ok!(adapter.sign_message(&params).await);
        assert_eq!(
            mock.calls()[0].args,
            vec![json!({
                "message": "login",
                "recipient": "app.near",
                "nonce": [1, 2, 3],
                "callbackUrl": "https://app.example/cb"
            })]
        );

        let without_callback = SignMessageParams {
            callback_url: None,
            ..params
        };
        assert!(without_callback.to_json().get("callbackUrl").is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!({})));
    }
}
