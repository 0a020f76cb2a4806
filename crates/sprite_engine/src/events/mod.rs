//! Named-event publish/subscribe
//!
//! Key principles:
//! - Listeners are keyed by event name (no restriction on the name format)
//! - Invocation order is registration order, duplicates are kept
//! - An optional lifecycle hook on the owning object runs before any listener
//! - A failing listener is logged and never stops the remaining listeners

use thiserror::Error;

/// Error returned by a fallible listener or lifecycle hook
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

impl ListenerError {
    /// Create a listener error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

type Callback<P> = Box<dyn FnMut(&P) -> Result<(), ListenerError>>;

struct Listener<P> {
    event: String,
    callback: Callback<P>,
}

/// Capability implemented by an object that wants to see its own events
/// before any externally registered listener.
pub trait LifecycleHook<P> {
    /// Handle `event` ahead of the listener table
    fn on_lifecycle(&mut self, event: &str, payload: &P) -> Result<(), ListenerError>;
}

/// Ordered listener table for events carrying a payload of type `P`
pub struct EventEmitter<P> {
    listeners: Vec<Listener<P>>,
}

impl<P> EventEmitter<P> {
    /// Create an emitter with no listeners
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener that runs every time `event` is emitted
    pub fn on<F>(&mut self, event: impl Into<String>, mut callback: F)
    where
        F: FnMut(&P) + 'static,
    {
        self.try_on(event, move |payload| {
            callback(payload);
            Ok(())
        });
    }

    /// Register a listener that may fail
    ///
    /// A failure is logged and the remaining listeners still run.
    pub fn try_on<F>(&mut self, event: impl Into<String>, callback: F)
    where
        F: FnMut(&P) -> Result<(), ListenerError> + 'static,
    {
        self.listeners.push(Listener {
            event: event.into(),
            callback: Box::new(callback),
        });
    }

    /// Invoke every listener registered for `event`, in registration order
    pub fn emit(&mut self, event: &str, payload: &P) {
        for listener in self.listeners.iter_mut().filter(|l| l.event == event) {
            if let Err(err) = (listener.callback)(payload) {
                log::warn!("Listener for '{}' failed: {}", event, err);
            }
        }
    }

    /// Invoke the owner's lifecycle hook, then every listener for `event`
    pub fn emit_with(&mut self, hook: &mut dyn LifecycleHook<P>, event: &str, payload: &P) {
        if let Err(err) = hook.on_lifecycle(event, payload) {
            log::warn!("Lifecycle hook for '{}' failed: {}", event, err);
        }
        self.emit(event, payload);
    }

    /// Remove all listeners for `event`, returning how many were removed
    pub fn off(&mut self, event: &str) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.event != event);
        before - self.listeners.len()
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.iter().filter(|l| l.event == event).count()
    }

    /// Whether no listener is registered at all
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl<P> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}
