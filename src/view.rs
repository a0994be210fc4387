//! Rendered views and the store that routes clicks back to their callbacks.
//!
//! A [`View`] is what a [`ComponentMessage`](crate::ComponentMessage)
//! renders into: the validated rows that go on the wire plus the callbacks
//! bound to their `custom_id`s. After a send or edit the client keeps the
//! bindings in a [`ViewStore`] until they go idle for longer than the view's
//! timeout.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_lite::future::Boxed;
use tracing::{debug, warn};

use crate::context::ComponentContext;
use crate::error::HandlerError;
use crate::types::*;

/// Inactivity timeout applied to views unless overridden.
pub const DEFAULT_VIEW_TIMEOUT: Duration = Duration::from_secs(180);

/// An async interaction callback.
pub type Callback =
    Arc<dyn Fn(ComponentContext) -> Boxed<Result<(), HandlerError>> + Send + Sync>;

/// Box an async closure into a [`Callback`].
pub fn callback<F, Fut>(f: F) -> Callback
where
    F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Arc::new(move |ctx: ComponentContext| -> Boxed<Result<(), HandlerError>> { Box::pin(f(ctx)) })
}

/// A callback together with the component it was rendered from.
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) callback: Callback,
    pub(crate) component: Component,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// The rendered, sendable form of a component message.
#[derive(Clone, Default)]
pub struct View {
    rows: Vec<ActionRow>,
    bindings: HashMap<String, Binding>,
    timeout: Option<Duration>,
}

impl View {
    /// An empty view that expires after `timeout` of inactivity (`None`
    /// keeps it alive for the life of the client).
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            rows: Vec::new(),
            bindings: HashMap::new(),
            timeout,
        }
    }

    /// A view with no rows; sending it strips all components.
    pub fn empty() -> Self {
        Self::new(None)
    }

    pub(crate) fn push_row(&mut self, row: ActionRow) {
        self.rows.push(row);
    }

    pub(crate) fn bind(&mut self, custom_id: &str, component: Component, callback: Callback) {
        self.bindings.insert(
            custom_id.to_string(),
            Binding {
                callback,
                component,
            },
        );
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_bound(&self, custom_id: &str) -> bool {
        self.bindings.contains_key(custom_id)
    }

    pub fn bound_ids(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub(crate) fn bindings(&self) -> impl Iterator<Item = (&String, &Binding)> {
        self.bindings.iter()
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<&str> = self.bound_ids().collect();
        bound.sort_unstable();
        f.debug_struct("View")
            .field("rows", &self.rows)
            .field("bound", &bound)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ViewStore
// ---------------------------------------------------------------------------

struct StoredBinding {
    binding: Binding,
    timeout: Option<Duration>,
    last_active: Instant,
}

impl StoredBinding {
    fn expired(&self, now: Instant) -> bool {
        self.timeout
            .is_some_and(|timeout| now.saturating_duration_since(self.last_active) > timeout)
    }
}

/// `(message_id, custom_id)`. A `None` message id marks a view sent as an
/// initial interaction response, whose message id is not known yet.
type ViewKey = (Option<Snowflake>, String);

fn view_key(message_id: Option<&str>, custom_id: &str) -> ViewKey {
    (message_id.map(str::to_string), custom_id.to_string())
}

/// Callback bindings of every live view.
#[derive(Default)]
pub(crate) struct ViewStore {
    entries: HashMap<ViewKey, StoredBinding>,
}

impl ViewStore {
    /// Register every binding of `view`.
    ///
    /// Pinned to a message, the view replaces all bindings previously held
    /// for that message. Unpinned, it replaces only its own `custom_id`s.
    pub(crate) fn register(&mut self, view: &View, message_id: Option<&str>, now: Instant) {
        self.prune(now);
        if let Some(message_id) = message_id {
            self.entries
                .retain(|(pinned, _), _| pinned.as_deref() != Some(message_id));
        }
        for (custom_id, binding) in view.bindings() {
            self.entries.insert(
                view_key(message_id, custom_id),
                StoredBinding {
                    binding: binding.clone(),
                    timeout: view.timeout(),
                    last_active: now,
                },
            );
        }
        debug!(
            bindings = self.entries.len(),
            message_id = message_id.unwrap_or("-"),
            "registered view"
        );
    }

    /// Drop the bindings `view` registered under `message_id`.
    pub(crate) fn unregister(&mut self, view: &View, message_id: Option<&str>) {
        for custom_id in view.bound_ids() {
            self.entries.remove(&view_key(message_id, custom_id));
        }
    }

    /// Find the live binding for a click, refreshing its inactivity timer.
    ///
    /// The binding pinned to the clicked message wins; unpinned bindings
    /// are the fallback.
    pub(crate) fn lookup(
        &mut self,
        custom_id: &str,
        message_id: Option<&str>,
        now: Instant,
    ) -> Option<Binding> {
        if let Some(message_id) = message_id {
            if let Some(binding) = self.touch(view_key(Some(message_id), custom_id), now) {
                return Some(binding);
            }
        }
        self.touch(view_key(None, custom_id), now)
    }

    fn touch(&mut self, key: ViewKey, now: Instant) -> Option<Binding> {
        let entry = self.entries.get_mut(&key)?;
        if entry.expired(now) {
            warn!(custom_id = %key.1, "view binding timed out, dropping it");
            self.entries.remove(&key);
            return None;
        }
        entry.last_active = now;
        Some(entry.binding.clone())
    }

    fn prune(&mut self, now: Instant) {
        self.entries.retain(|_, entry| !entry.expired(now));
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
