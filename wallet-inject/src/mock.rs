//! In-memory host and provider doubles.
//!
//! [`MockHost`] and [`MockProvider`] stand in for a real execution
//! environment. They are used by this crate's tests and by the CLI, which
//! builds a simulated host from a JSON [`HostFixture`].

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{HostError, ProviderError};
use crate::host::{Announcement, EventListener, Host, HostValue, InjectedObject, ListenerId, ProviderRef};

type Scripted = Result<Value, ProviderError>;

/// A recorded call on a [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Method name.
    pub method: String,
    /// Arguments passed.
    pub args: Vec<Value>,
}

#[derive(Debug)]
struct MockMethod {
    queued: VecDeque<Scripted>,
    fallback: Scripted,
}

/// A scriptable injected object.
///
/// Methods return `null` unless scripted otherwise. Queued responses are
/// consumed first, then the method's fallback response repeats.
#[derive(Debug, Default)]
pub struct MockProvider {
    methods: Mutex<HashMap<String, MockMethod>>,
    properties: HashMap<String, Value>,
    members: HashMap<String, ProviderRef>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    /// Create a provider with no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(mut self, name: &str, fallback: Scripted) -> Self {
        let methods = self.methods.get_mut().unwrap_or_else(std::sync::PoisonError::into_inner);
        methods
            .entry(name.to_string())
            .and_modify(|m| m.fallback = fallback.clone())
            .or_insert(MockMethod {
                queued: VecDeque::new(),
                fallback,
            });
        self
    }

    /// Declare a callable method returning `null`.
    #[must_use]
    pub fn method(self, name: &str) -> Self {
        self.script(name, Ok(Value::Null))
    }

    /// Declare a method that always returns `value`.
    #[must_use]
    pub fn returns(self, name: &str, value: Value) -> Self {
        self.script(name, Ok(value))
    }

    /// Declare a method that always rejects with `message`.
    #[must_use]
    pub fn fails(self, name: &str, message: &str) -> Self {
        self.script(name, Err(ProviderError::new(message)))
    }

    /// Queue one-shot responses consumed before the fallback.
    ///
    /// Declares the method (returning `null` afterwards) if needed.
    #[must_use]
    pub fn queue(mut self, name: &str, responses: impl IntoIterator<Item = Scripted>) -> Self {
        let methods = self.methods.get_mut().unwrap_or_else(std::sync::PoisonError::into_inner);
        methods
            .entry(name.to_string())
            .or_insert(MockMethod {
                queued: VecDeque::new(),
                fallback: Ok(Value::Null),
            })
            .queued
            .extend(responses);
        self
    }

    /// Set a plain data property.
    #[must_use]
    pub fn property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Set a nested object member.
    #[must_use]
    pub fn member(mut self, name: &str, object: ProviderRef) -> Self {
        self.members.insert(name.to_string(), object);
        self
    }

    /// Wrap into a shared provider handle.
    #[must_use]
    pub fn shared(self) -> ProviderRef {
        Arc::new(self)
    }

    /// Wrap into a host value.
    #[must_use]
    pub fn into_value(self) -> HostValue {
        HostValue::Object(self.shared())
    }

    /// All calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Names of the methods called so far, in order.
    #[must_use]
    pub fn called_methods(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.method.clone()).collect()
    }

    /// Number of calls received by `method`.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.method == method).count()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl InjectedObject for MockProvider {
    fn has_method(&self, name: &str) -> bool {
        lock(&self.methods).contains_key(name)
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn member(&self, name: &str) -> Option<ProviderRef> {
        self.members.get(name).map(Arc::clone)
    }

    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, ProviderError> {
        lock(&self.calls).push(MockCall {
            method: method.to_string(),
            args,
        });

        let mut methods = lock(&self.methods);
        let Some(entry) = methods.get_mut(method) else {
            return Err(ProviderError::new(format!("{method} is not a function")));
        };
        entry
            .queued
            .pop_front()
            .unwrap_or_else(|| entry.fallback.clone())
    }
}

/// An in-memory host environment.
pub struct MockHost {
    globals: RwLock<HashMap<String, HostValue>>,
    failing: RwLock<HashSet<String>>,
    reads: Mutex<HashMap<String, usize>>,
    dispatched: Mutex<Vec<String>>,
    listeners: Mutex<Vec<(ListenerId, String, EventListener)>>,
    responders: Mutex<Vec<Responder>>,
    next_listener: AtomicU64,
}

/// A wallet that announces itself when a given event is dispatched.
#[derive(Debug, Clone)]
struct Responder {
    trigger: String,
    announce_event: String,
    announcement: Announcement,
}

impl std::fmt::Debug for MockHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let globals: Vec<String> = read(&self.globals).keys().cloned().collect();
        f.debug_struct("MockHost")
            .field("globals", &globals)
            .field("listeners", &lock(&self.listeners).len())
            .finish_non_exhaustive()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            globals: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            reads: Mutex::new(HashMap::new()),
            dispatched: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
            responders: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Place a value under a global key, replacing any previous one.
    pub fn set_global(&self, key: &str, value: HostValue) {
        write(&self.globals).insert(key.to_string(), value);
    }

    /// Remove a global key.
    pub fn remove_global(&self, key: &str) {
        write(&self.globals).remove(key);
    }

    /// Make reads of `key` fail, as a throwing getter would.
    pub fn fail_global(&self, key: &str) {
        write(&self.failing).insert(key.to_string());
    }

    /// How many times `key` has been read.
    #[must_use]
    pub fn reads(&self, key: &str) -> usize {
        lock(&self.reads).get(key).copied().unwrap_or(0)
    }

    /// Names of the events dispatched so far, in order.
    #[must_use]
    pub fn dispatched_events(&self) -> Vec<String> {
        lock(&self.dispatched).clone()
    }

    /// Number of listeners subscribed to `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        lock(&self.listeners)
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }

    /// Deliver an announcement to every listener of `event`.
    pub fn announce(&self, event: &str, announcement: &Announcement) {
        let targets: Vec<EventListener> = lock(&self.listeners)
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, listener)| Arc::clone(listener))
            .collect();
        for listener in targets {
            listener(announcement.clone());
        }
    }

    /// Announce `announcement` on `announce_event` every time `trigger` is
    /// dispatched, synchronously from inside [`Host::dispatch_event`].
    pub fn on_dispatch(&self, trigger: &str, announce_event: &str, announcement: Announcement) {
        lock(&self.responders).push(Responder {
            trigger: trigger.to_string(),
            announce_event: announce_event.to_string(),
            announcement,
        });
    }

    /// Build a host from a fixture.
    #[must_use]
    pub fn from_fixture(fixture: &HostFixture) -> Self {
        let host = Self::new();
        for (key, global) in &fixture.globals {
            host.set_global(key, global.to_value());
        }
        for key in &fixture.failing {
            host.fail_global(key);
        }
        host
    }
}

impl Host for MockHost {
    fn global(&self, key: &str) -> Result<Option<HostValue>, HostError> {
        *lock(&self.reads).entry(key.to_string()).or_default() += 1;
        if read(&self.failing).contains(key) {
            return Err(HostError::new(key, "getter threw"));
        }
        Ok(read(&self.globals).get(key).cloned())
    }

    fn dispatch_event(&self, name: &str) {
        lock(&self.dispatched).push(name.to_string());
        let responders: Vec<Responder> = lock(&self.responders)
            .iter()
            .filter(|r| r.trigger == name)
            .cloned()
            .collect();
        for responder in responders {
            self.announce(&responder.announce_event, &responder.announcement);
        }
    }

    fn add_event_listener(&self, name: &str, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        lock(&self.listeners).push((id, name.to_string(), listener));
        id
    }

    fn remove_event_listener(&self, id: ListenerId) {
        lock(&self.listeners).retain(|(listener_id, _, _)| *listener_id != id);
    }
}

/// JSON description of a simulated object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectFixture {
    /// Method name to the value it returns.
    pub methods: BTreeMap<String, Value>,
    /// Method name to the rejection message it fails with.
    pub failing_methods: BTreeMap<String, String>,
    /// Plain data properties.
    pub properties: BTreeMap<String, Value>,
    /// Nested object members.
    pub members: BTreeMap<String, ObjectFixture>,
}

impl ObjectFixture {
    /// Build the provider this fixture describes.
    #[must_use]
    pub fn to_provider(&self) -> MockProvider {
        let mut provider = MockProvider::new();
        for (name, value) in &self.methods {
            provider = provider.returns(name, value.clone());
        }
        for (name, message) in &self.failing_methods {
            provider = provider.fails(name, message);
        }
        for (name, value) in &self.properties {
            provider = provider.property(name, value.clone());
        }
        for (name, member) in &self.members {
            provider = provider.member(name, member.to_provider().shared());
        }
        provider
    }
}

/// JSON description of one global.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalFixture {
    /// The object at this key.
    #[serde(flatten)]
    pub object: ObjectFixture,
    /// When set, the global is an array of these objects instead.
    #[serde(default)]
    pub list: Option<Vec<ObjectFixture>>,
}

impl GlobalFixture {
    fn to_value(&self) -> HostValue {
        match &self.list {
            Some(items) => HostValue::List(
                items
                    .iter()
                    .map(|item| item.to_provider().into_value())
                    .collect(),
            ),
            None => self.object.to_provider().into_value(),
        }
    }
}

/// JSON description of an announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementFixture {
    /// Wallet identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Icon URL.
    #[serde(default)]
    pub icon: Option<String>,
    /// Website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// The announced provider.
    #[serde(default)]
    pub provider: ObjectFixture,
}

impl AnnouncementFixture {
    /// Build the announcement this fixture describes.
    #[must_use]
    pub fn to_announcement(&self) -> Announcement {
        Announcement {
            id: self.id.clone(),
            provider: self.provider.to_provider().into_value(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            website: self.website.clone(),
        }
    }
}

/// JSON description of a simulated host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostFixture {
    /// Globals by key.
    pub globals: BTreeMap<String, GlobalFixture>,
    /// Keys whose getters fail.
    pub failing: Vec<String>,
    /// Announcements to deliver after detection starts.
    pub announcements: Vec<AnnouncementFixture>,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}
