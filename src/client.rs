//! The client: a host plus the in-memory registries that route interactions.
//!
//! Inbound events reach handlers two ways:
//!
//! - **View bindings.** Callbacks rendered into a [`View`] and registered
//!   after a send or edit. A click on a bound `custom_id` runs its callback.
//! - **Listeners.** Raw subscriptions via [`Client::listen`], awaited for
//!   every interaction in registration order. The
//!   [`ComponentRouter`](crate::ComponentRouter) is built on one.
//!
//! Handler failures are logged and do not stop the remaining handlers.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use async_lock::Mutex;
use futures_lite::future::Boxed;
use tracing::{debug, error, trace};

use crate::context::ComponentContext;
use crate::error::{ComponentError, HandlerError};
use crate::events::GatewayEvent;
use crate::host::{Host, InteractionHandle};
use crate::types::*;
use crate::view::{View, ViewStore};

/// A raw interaction subscription.
pub type Listener =
    Arc<dyn Fn(Client, InteractionHandle) -> Boxed<Result<(), HandlerError>> + Send + Sync>;

struct Inner {
    host: Arc<dyn Host>,
    views: Mutex<ViewStore>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
}

/// Cheap to clone; all clones share one host and one set of registries.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl Client {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            inner: Arc::new(Inner {
                host,
                views: Mutex::new(ViewStore::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    /// A client talking to Discord over HTTP.
    #[cfg(feature = "io")]
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ComponentError> {
        let http = crate::http::DiscordHttpClient::new(config)?;
        Ok(Self::new(Arc::new(http)))
    }

    pub fn host(&self) -> &dyn Host {
        self.inner.host.as_ref()
    }

    /// Send the one initial response an interaction allows.
    ///
    /// Fails with [`ComponentError::State`] if the interaction was already
    /// responded to. A response the host rejects leaves the interaction open.
    pub async fn respond(
        &self,
        handle: &InteractionHandle,
        response: &InteractionResponse,
    ) -> Result<(), ComponentError> {
        let interaction = handle.interaction();
        if !handle.claim_response() {
            return Err(ComponentError::State(format!(
                "interaction {} has already been responded to",
                interaction.id
            )));
        }

        debug!(
            interaction_id = %interaction.id,
            kind = ?response.kind,
            "responding to interaction"
        );
        if let Err(e) = self
            .inner
            .host
            .create_interaction_response(&interaction.id, &interaction.token, response)
            .await
        {
            handle.release_response();
            return Err(e.into());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Subscribe to every dispatched interaction.
    pub async fn listen<F, Fut>(&self, listener: F) -> Subscription
    where
        F: Fn(Client, InteractionHandle) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let listener: Listener = Arc::new(
            move |client: Client, handle: InteractionHandle| -> Boxed<Result<(), HandlerError>> {
                Box::pin(listener(client, handle))
            },
        );
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().await.push((id, listener));
        debug!(listener = id, "listener subscribed");
        Subscription {
            client: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Keep `view`'s callbacks reachable, optionally pinned to one message.
    ///
    /// Registering for a message replaces whatever that message had bound,
    /// so an empty view stops its routing.
    pub async fn register_view(&self, view: &View, message_id: Option<&str>) {
        self.inner
            .views
            .lock()
            .await
            .register(view, message_id, Instant::now());
    }

    /// Forget the bindings `view` registered under `message_id`.
    pub async fn unregister_view(&self, view: &View, message_id: Option<&str>) {
        self.inner.views.lock().await.unregister(view, message_id);
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Feed one gateway event through the registries. Returns how many
    /// handlers ran.
    pub async fn dispatch(&self, event: GatewayEvent) -> usize {
        match event {
            GatewayEvent::InteractionCreate(interaction) => {
                self.dispatch_interaction(InteractionHandle::new(interaction))
                    .await
            }
            GatewayEvent::Unknown { event_name, op, .. } => {
                trace!(event = ?event_name, op, "ignoring gateway event");
                0
            }
        }
    }

    pub async fn dispatch_payload(&self, payload: GatewayPayload) -> usize {
        self.dispatch(GatewayEvent::from_payload(payload)).await
    }

    /// Run the bound view callback (if any), then every listener.
    pub async fn dispatch_interaction(&self, handle: InteractionHandle) -> usize {
        let mut invoked = 0;

        if let Some(binding) = self.bound_callback(&handle).await {
            let custom_id = binding.component.custom_id().unwrap_or_default().to_string();
            let ctx = ComponentContext::new(self.clone(), handle.clone(), binding.component);
            invoked += 1;
            if let Err(e) = (binding.callback)(ctx).await {
                error!(custom_id = %custom_id, error = %e, "view callback failed");
            }
        }

        let listeners: Vec<(u64, Listener)> = self.inner.listeners.lock().await.clone();
        for (id, listener) in listeners {
            invoked += 1;
            if let Err(e) = listener(self.clone(), handle.clone()).await {
                error!(listener = id, error = %e, "interaction listener failed");
            }
        }

        invoked
    }

    async fn bound_callback(&self, handle: &InteractionHandle) -> Option<crate::view::Binding> {
        let interaction = handle.interaction();
        if !interaction.is_component() {
            return None;
        }
        let custom_id = interaction.data.as_ref()?.custom_id.as_deref()?;
        let message_id = interaction.message.as_ref().map(|m| m.id.as_str());
        self.inner
            .views
            .lock()
            .await
            .lookup(custom_id, message_id, Instant::now())
    }

    #[cfg(test)]
    pub(crate) async fn bound_view_count(&self) -> usize {
        self.inner.views.lock().await.len()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Handle returned by [`Client::listen`].
#[derive(Debug)]
pub struct Subscription {
    client: Weak<Inner>,
    id: u64,
}

impl Subscription {
    /// Remove the listener. Returns `false` if it was already gone.
    pub async fn unsubscribe(self) -> bool {
        let Some(inner) = self.client.upgrade() else {
            return false;
        };
        let mut listeners = inner.listeners.lock().await;
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != self.id);
        debug!(listener = self.id, "listener unsubscribed");
        listeners.len() != before
    }
}
