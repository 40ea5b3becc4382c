//! Account type and normalization of untrusted account payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field spellings wallets use for the account identifier, in priority order.
pub const ACCOUNT_ID_FIELDS: &[&str] = &["accountId", "account_id", "accountID", "id", "address"];

/// Field spellings wallets use for the public key, in priority order.
pub const PUBLIC_KEY_FIELDS: &[&str] = &["publicKey", "public_key", "pubKey", "pubkey"];

/// Field under which some wallets nest the real payload.
const NESTED_FIELD: &str = "accounts";

/// Nesting bound for `accounts` wrappers and nested arrays.
const MAX_DEPTH: usize = 8;

/// A connected account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub account_id: String,
    /// Public key, when the wallet reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl Account {
    /// Create an account without a public key.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            public_key: None,
        }
    }

    /// Attach a public key.
    #[must_use]
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }
}

/// Coerce whatever a wallet returned into a list of accounts.
///
/// Accepted shapes: a string; an object carrying an id under any spelling in
/// [`ACCOUNT_ID_FIELDS`]; an object nesting the payload under `accounts`;
/// an array of any of these. Everything else yields an empty list. Never
/// panics, and normalizing the serialized output again yields the same list.
#[must_use]
pub fn normalize_accounts(value: &Value) -> Vec<Account> {
    normalize(value, 0)
}

fn normalize(value: &Value, depth: usize) -> Vec<Account> {
    if depth > MAX_DEPTH {
        return Vec::new();
    }
    match value {
        Value::String(id) => from_id(id).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .flat_map(|item| normalize(item, depth + 1))
            .collect(),
        Value::Object(map) => {
            if let Some(nested) = map.get(NESTED_FIELD) {
                let accounts = normalize(nested, depth + 1);
                if !accounts.is_empty() {
                    return accounts;
                }
            }
            from_object(map).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn from_id(id: &str) -> Option<Account> {
    (!id.is_empty()).then(|| Account::new(id))
}

fn from_object(map: &Map<String, Value>) -> Option<Account> {
    let account_id = first_string(map, ACCOUNT_ID_FIELDS)?;
    let public_key = first_string(map, PUBLIC_KEY_FIELDS);
    Some(Account {
        account_id,
        public_key,
    })
}

fn first_string(map: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match map.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_and_garbage_yield_empty() {
        for value in [json!(null), json!(42), json!(true), json!(""), json!({}), json!([])] {
            assert!(normalize_accounts(&value).is_empty(), "{value}");
        }
    }

    #[test]
    fn test_single_string() {
        assert_eq!(
            normalize_accounts(&json!("alice.near")),
            vec![Account::new("alice.near")]
        );
    }

    #[test]
    fn test_nested_accounts_field() {
        assert_eq!(
            normalize_accounts(&json!({"accounts": ["a.near", "b.near"]})),
            vec![Account::new("a.near"), Account::new("b.near")]
        );
    }

    #[test]
    fn test_heterogeneous_field_spellings() {
        let value = json!([
            {"accountId": "a.near", "publicKey": "ed25519:AAA"},
            {"account_id": "b.near", "public_key": "ed25519:BBB"},
            {"accountID": "c.near", "pubKey": "ed25519:CCC"},
            {"id": "d.near"},
            {"address": "e.near", "pubkey": "ed25519:EEE"},
            {"name": "no id here"},
            "f.near",
            7
        ]);
        let accounts = normalize_accounts(&value);
        assert_eq!(
            accounts,
            vec![
                Account::new("a.near").with_public_key("ed25519:AAA"),
                Account::new("b.near").with_public_key("ed25519:BBB"),
                Account::new("c.near").with_public_key("ed25519:CCC"),
                Account::new("d.near"),
                Account::new("e.near").with_public_key("ed25519:EEE"),
                Account::new("f.near"),
            ]
        );
    }

    #[test]
    fn test_single_object_and_field_priority() {
        let value = json!({"id": "ignored", "accountId": "wins.near", "publicKey": 12});
        assert_eq!(normalize_accounts(&value), vec![Account::new("wins.near")]);
    }

    #[test]
    fn test_empty_nested_falls_back_to_own_id() {
        let value = json!({"accounts": [], "accountId": "self.near"});
        assert_eq!(normalize_accounts(&value), vec![Account::new("self.near")]);
    }

    #[test]
    fn test_duplicates_pass_through() {
        let value = json!(["dup.near", "dup.near"]);
        assert_eq!(normalize_accounts(&value).len(), 2);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let first = normalize_accounts(&json!([
            {"account_id": "a.near", "pubKey": "ed25519:AAA"},
            "b.near"
        ]));
        let reserialized = serde_json::to_value(&first).unwrap();
        assert_eq!(normalize_accounts(&reserialized), first);
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let mut value = json!("deep.near");
        for _ in 0..64 {
            value = json!({"accounts": value});
        }
        assert!(normalize_accounts(&value).is_empty());
    }
}
