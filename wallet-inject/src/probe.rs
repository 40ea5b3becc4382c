//! Capability probe: does a host value look like a wallet provider?

use crate::host::HostValue;

/// Method names whose presence marks an object as a plausible provider.
///
/// Connect, sign-in, sign-and-send, connection-status and enable styles.
pub const PROVIDER_METHODS: &[&str] = &[
    "connect",
    "signIn",
    "requestSignIn",
    "signAndSendTransaction",
    "isSignedIn",
    "isConnected",
    "enable",
];

/// Whether `candidate` exposes at least one recognized callable member.
///
/// False positives are acceptable: an adapter over a non-wallet fails at
/// call time with an unsupported error. Null, plain data and arrays are
/// never plausible.
#[must_use]
pub fn is_plausible_provider(candidate: &HostValue) -> bool {
    candidate
        .as_object()
        .is_some_and(|object| PROVIDER_METHODS.iter().any(|m| object.has_method(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use serde_json::json;

    #[test]
    fn test_object_with_any_known_method_is_plausible() {
        for method in PROVIDER_METHODS {
            let provider = MockProvider::new().method(*method).into_value();
            assert!(is_plausible_provider(&provider), "{method}");
        }
    }

    #[test]
    fn test_object_without_known_methods_is_rejected() {
        let provider = MockProvider::new()
            .method("postMessage")
            .property("accountId", json!("alice.near"))
            .into_value();
        assert!(!is_plausible_provider(&provider));
    }

    #[test]
    fn test_non_objects_are_rejected() {
        assert!(!is_plausible_provider(&HostValue::Null));
        assert!(!is_plausible_provider(&HostValue::Data(json!({"connect": true}))));
        assert!(!is_plausible_provider(&HostValue::List(vec![
            MockProvider::new().method("connect").into_value()
        ])));
    }
}
