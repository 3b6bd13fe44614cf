//! Notification points fired around changegroup construction.
//!
//! Hooks are plain closures registered against a [`HookEvent`] on a
//! [`HookRegistry`] that is built once and then shared. Callers that only
//! need to fire events depend on the [`HookSink`] trait.

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Boxed error returned by a failing hook.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

type HookFn = dyn Fn(&HookArgs) -> Result<(), BoxError> + Send + Sync;

/// Points at which hooks fire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HookEvent {
    /// Changesets are about to leave the repository.
    Outgoing,
    /// An incoming changegroup is about to be applied.
    PreChangegroup,
    /// An incoming changegroup has been applied.
    Changegroup,
}

impl HookEvent {
    /// All events in declaration order.
    pub const ALL: [Self; 3] = [Self::Outgoing, Self::PreChangegroup, Self::Changegroup];

    /// Returns the conventional lowercase name of the event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::PreChangegroup => "prechangegroup",
            Self::Changegroup => "changegroup",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = UnknownHookEvent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == name)
            .ok_or_else(|| UnknownHookEvent {
                name: name.to_owned(),
            })
    }
}

/// Returned when parsing a [`HookEvent`] from an unrecognised name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown hook event '{name}'")]
pub struct UnknownHookEvent {
    name: String,
}

impl UnknownHookEvent {
    /// Returns the name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Arguments handed to every hook of one invocation.
///
/// Arguments keep insertion order; setting an existing key replaces its
/// value in place. `throw` selects whether a failing hook aborts the
/// invocation and defaults to `false`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HookArgs {
    pairs: Vec<(String, String)>,
    throw: bool,
}

impl HookArgs {
    /// Creates an empty, non-throwing argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Selects whether the first hook failure is returned to the caller.
    pub fn throwing(mut self, throw: bool) -> Self {
        self.throw = throw;
        self
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Looks up the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates the arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` when failures abort the invocation.
    #[must_use]
    pub const fn is_throwing(&self) -> bool {
        self.throw
    }
}

/// A hook failed while [`HookArgs::is_throwing`] was set.
#[derive(Debug, thiserror::Error)]
#[error("{event} hook #{index} failed: {source}")]
pub struct HookError {
    event: HookEvent,
    index: usize,
    #[source]
    source: BoxError,
}

impl HookError {
    /// Returns the event that was being fired.
    #[must_use]
    pub const fn event(&self) -> HookEvent {
        self.event
    }

    /// Returns the zero-based registration index of the failing hook.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Receiver of hook notifications.
pub trait HookSink {
    /// Fires `event` with `args`.
    fn notify(&self, event: HookEvent, args: &HookArgs) -> Result<(), HookError>;
}

/// Immutable table of hooks keyed by event.
///
/// ```
/// use changegroup::hooks::{HookArgs, HookEvent, HookRegistry, HookSink};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
/// let hooks = HookRegistry::builder()
///     .on(HookEvent::Outgoing, move |args| {
///         assert_eq!(args.get("source"), Some("push"));
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     })
///     .build();
///
/// hooks.notify(HookEvent::Outgoing, &HookArgs::new().with("source", "push"))?;
/// hooks.notify(HookEvent::Changegroup, &HookArgs::new())?;
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// # Ok::<(), changegroup::hooks::HookError>(())
/// ```
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: Arc<[(HookEvent, Box<HookFn>)]>,
}

impl HookRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> HookRegistryBuilder {
        HookRegistryBuilder::default()
    }

    /// Returns the number of hooks registered for `event`.
    #[must_use]
    pub fn count(&self, event: HookEvent) -> usize {
        self.for_event(event).count()
    }

    /// Returns `true` when no hooks are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    fn for_event(&self, event: HookEvent) -> impl Iterator<Item = &HookFn> + '_ {
        self.hooks
            .iter()
            .filter(move |(registered, _)| *registered == event)
            .map(|(_, hook)| hook.as_ref())
    }
}

impl HookSink for HookRegistry {
    /// Runs every hook for `event` in registration order.
    ///
    /// Without `throw`, failures are logged and the remaining hooks still run.
    fn notify(&self, event: HookEvent, args: &HookArgs) -> Result<(), HookError> {
        for (index, hook) in self.for_event(event).enumerate() {
            if let Err(source) = hook(args) {
                if args.is_throwing() {
                    return Err(HookError {
                        event,
                        index,
                        source,
                    });
                }
                tracing::warn!(
                    target: "changegroup::hooks",
                    event = %event,
                    index,
                    error = %source,
                    "hook failed"
                );
            }
        }
        Ok(())
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in HookEvent::ALL {
            map.entry(&event.as_str(), &self.count(event));
        }
        map.finish()
    }
}

/// Builder for [`HookRegistry`].
#[derive(Default)]
pub struct HookRegistryBuilder {
    hooks: Vec<(HookEvent, Box<HookFn>)>,
}

impl HookRegistryBuilder {
    /// Registers `hook` for `event`.
    pub fn on<F>(mut self, event: HookEvent, hook: F) -> Self
    where
        F: Fn(&HookArgs) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let hook: Box<HookFn> = Box::new(hook);
        self.hooks.push((event, hook));
        self
    }

    /// Registers one shared hook for several events.
    pub fn on_each<F>(mut self, events: impl IntoIterator<Item = HookEvent>, hook: F) -> Self
    where
        F: Fn(&HookArgs) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let hook = Arc::new(hook);
        for event in events {
            let shared = Arc::clone(&hook);
            let forward: Box<HookFn> = Box::new(move |args: &HookArgs| (*shared)(args));
            self.hooks.push((event, forward));
        }
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> HookRegistry {
        HookRegistry {
            hooks: self.hooks.into(),
        }
    }
}

impl fmt::Debug for HookRegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistryBuilder")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
