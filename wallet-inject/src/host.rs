//! Abstractions over the shared execution environment wallets inject into.
//!
//! The environment is modelled by two traits:
//!
//! - [`Host`]: the global namespace plus an event bus (dispatch and listen)
//! - [`InjectedObject`]: an object some wallet placed into the namespace
//!
//! Values read from the namespace are untyped; [`HostValue`] keeps the
//! distinction between plain data, callable objects and arrays so that the
//! capability probe can decide what it is looking at without guessing.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{HostError, ProviderError};

/// Shared handle to an injected object.
pub type ProviderRef = Arc<dyn InjectedObject>;

/// Callback registered on the host's event bus.
pub type EventListener = Arc<dyn Fn(Announcement) + Send + Sync>;

/// An object injected into the host by third-party wallet software.
///
/// Implementations wrap whatever the real environment offers (a JS object
/// through bindings, an IPC endpoint, a test double). The adapter only
/// relies on these four primitives.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait InjectedObject: Send + Sync + fmt::Debug {
    /// Whether the object has a callable member with this name.
    fn has_method(&self, name: &str) -> bool;

    /// Read a plain data property.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Read a nested object member.
    fn member(&self, _name: &str) -> Option<ProviderRef> {
        None
    }

    /// Invoke a method with JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns the wallet's own rejection.
    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, ProviderError>;
}

/// A value read from the host's global namespace.
#[derive(Debug, Clone)]
pub enum HostValue {
    /// `null` / `undefined`.
    Null,
    /// Plain data with no callable members.
    Data(Value),
    /// An object that may expose callable members.
    Object(ProviderRef),
    /// An array of host values.
    List(Vec<HostValue>),
}

impl HostValue {
    /// Borrow the object, if this value is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ProviderRef> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether this value is `null` / `undefined`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<ProviderRef> for HostValue {
    fn from(object: ProviderRef) -> Self {
        Self::Object(object)
    }
}

/// Identifier of a listener registered with [`Host::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The shared environment wallets inject into.
pub trait Host: Send + Sync {
    /// Read a global by key.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when inspecting the global itself fails (for
    /// example a throwing getter).
    fn global(&self, key: &str) -> Result<Option<HostValue>, HostError>;

    /// Broadcast a payload-less event.
    fn dispatch_event(&self, name: &str);

    /// Subscribe to announcements broadcast under `name`.
    fn add_event_listener(&self, name: &str, listener: EventListener) -> ListenerId;

    /// Remove a listener previously returned by [`add_event_listener`](Self::add_event_listener).
    fn remove_event_listener(&self, id: ListenerId);
}

/// A self-description a wallet broadcasts when it finishes injecting.
#[derive(Debug, Clone)]
pub struct Announcement {
    /// Wallet identifier.
    pub id: String,
    /// The announced provider object.
    pub provider: HostValue,
    /// Display name.
    pub name: Option<String>,
    /// Icon URL.
    pub icon: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}

impl Announcement {
    /// Create an announcement with the required fields.
    pub fn new(id: impl Into<String>, provider: impl Into<HostValue>) -> Self {
        Self {
            id: id.into(),
            provider: provider.into(),
            name: None,
            icon: None,
            website: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the icon URL.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the website URL.
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}
