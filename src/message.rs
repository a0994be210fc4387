//! The component message: layout, rendering, and the send/edit lifecycle.
//!
//! A [`ComponentMessage`] collects up to [`MAX_ROWS`] action rows, content,
//! and embeds. Components are placed either into an explicit row or
//! appended to the last row with room. Callbacks registered with
//! [`ComponentMessage::on_interaction`] are bound when the message renders
//! into a [`View`], and the client routes clicks to them after a send.
//!
//! ```ignore
//! let mut menu = ComponentMessage::new().content("Pick one");
//! menu.add_component(Button::new("yes").label("Yes"), None)?;
//! menu.add_component(Button::new("no").label("No"), None)?;
//! menu.on_interaction("yes", |ctx| async move {
//!     ctx.reply("great").await?;
//!     Ok(())
//! });
//! menu.send(&client, SendTarget::Channel(channel_id), SendOptions::default()).await?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::Client;
use crate::context::ComponentContext;
use crate::error::{ComponentError, HandlerError};
use crate::host::InteractionHandle;
use crate::types::*;
use crate::view::{callback, Callback, View, DEFAULT_VIEW_TIMEOUT};

/// Discord allows at most this many action rows per message.
pub const MAX_ROWS: usize = 5;

/// Where [`ComponentMessage::send`] delivers the message.
#[derive(Debug, Clone)]
pub enum SendTarget {
    /// A plain channel send.
    Channel(Snowflake),
    /// The interaction's initial response, or a follow-up once it has one.
    Interaction(InteractionHandle),
}

impl From<InteractionHandle> for SendTarget {
    fn from(handle: InteractionHandle) -> Self {
        SendTarget::Interaction(handle)
    }
}

impl From<&ComponentContext> for SendTarget {
    fn from(ctx: &ComponentContext) -> Self {
        SendTarget::Interaction(ctx.interaction().clone())
    }
}

/// Per-send overrides.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Send this view instead of rendering the message's own rows.
    pub view: Option<View>,
    /// Only the invoking user sees the message. Interaction targets only.
    pub ephemeral: bool,
}

/// Returned by [`ComponentMessage::on_interaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerHandle {
    custom_id: String,
}

impl ListenerHandle {
    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }
}

/// A message with interactive components.
pub struct ComponentMessage {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    rows: Vec<ActionRow>,
    listeners: HashMap<String, Callback>,
    view: Option<View>,
    message: Option<Message>,
    interaction: Option<InteractionHandle>,
    /// The view last handed to the client and the message id it is pinned to.
    registered: Option<(View, Option<Snowflake>)>,
    timeout: Option<Duration>,
}

impl Default for ComponentMessage {
    fn default() -> Self {
        Self {
            content: None,
            embeds: Vec::new(),
            rows: Vec::new(),
            listeners: HashMap::new(),
            view: None,
            message: None,
            interaction: None,
            registered: None,
            timeout: Some(DEFAULT_VIEW_TIMEOUT),
        }
    }
}

impl ComponentMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from up to [`MAX_ROWS`] prepared rows.
    pub fn with_rows(rows: Vec<ActionRow>) -> Result<Self, ComponentError> {
        let mut message = Self::new();
        for row in rows {
            message.add_row(row)?;
        }
        Ok(message)
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Inactivity timeout of rendered views; `None` never expires.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    /// The view from the last render, send, or edit.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// The message this instance was last sent as, if known.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn interaction(&self) -> Option<&InteractionHandle> {
        self.interaction.as_ref()
    }

    /// Tie this message to an interaction so [`edit`](Self::edit) answers
    /// through it, e.g. to rewrite the message a component was clicked on.
    pub fn bind_interaction(&mut self, handle: InteractionHandle) {
        self.message = None;
        self.interaction = Some(handle);
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Append a whole row.
    pub fn add_row(&mut self, row: ActionRow) -> Result<(), ComponentError> {
        if self.rows.len() >= MAX_ROWS {
            return Err(ComponentError::Capacity(format!(
                "message already has {MAX_ROWS} action rows"
            )));
        }
        row.validate()?;
        self.rows.push(row);
        Ok(())
    }

    /// Place a component.
    ///
    /// With a row index (or a component carrying its own `row` hint) the
    /// component goes to that row, padding with empty rows as needed.
    /// Otherwise it joins the last row if that has room, else a new row.
    pub fn add_component(
        &mut self,
        component: impl Into<Component>,
        row: Option<usize>,
    ) -> Result<(), ComponentError> {
        let component: Component = component.into();
        match row.or_else(|| component.row().map(usize::from)) {
            Some(index) => self.place_in_row(component, index),
            None => self.place_auto(component),
        }
    }

    fn place_in_row(&mut self, component: Component, index: usize) -> Result<(), ComponentError> {
        if index >= MAX_ROWS {
            return Err(ComponentError::Capacity(format!(
                "row {index} is out of range, rows are numbered 0..{MAX_ROWS}"
            )));
        }
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, ActionRow::default);
        }
        let row = &mut self.rows[index];
        if row.is_full() {
            return Err(ComponentError::Capacity(format!(
                "row {index} already holds {MAX_ROW_COMPONENTS} components"
            )));
        }
        row.components.push(component);
        Ok(())
    }

    fn place_auto(&mut self, component: Component) -> Result<(), ComponentError> {
        if let Some(last) = self.rows.last_mut() {
            if !last.is_full() {
                last.components.push(component);
                return Ok(());
            }
        }
        if self.rows.len() >= MAX_ROWS {
            return Err(ComponentError::Capacity(format!(
                "all {MAX_ROWS} action rows are full"
            )));
        }
        self.rows.push(ActionRow::new(vec![component]));
        Ok(())
    }

    /// Remove the first component with `custom_id`, dropping its row if it
    /// ends up empty.
    pub fn remove_component(&mut self, custom_id: &str) -> bool {
        let found = self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.components
                .iter()
                .position(|c| c.custom_id() == Some(custom_id))
                .map(|position| (row_index, position))
        });
        let Some((row_index, position)) = found else {
            return false;
        };

        self.rows[row_index].components.remove(position);
        if self.rows[row_index].is_empty() {
            self.rows.remove(row_index);
        }
        true
    }

    pub fn clear_components(&mut self) {
        self.rows.clear();
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Run `f` whenever the component with `custom_id` is used. Replaces
    /// any earlier callback for the same id.
    pub fn on_interaction<F, Fut>(&mut self, custom_id: impl Into<String>, f: F) -> ListenerHandle
    where
        F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        let custom_id: String = custom_id.into();
        self.listeners.insert(custom_id.clone(), callback(f));
        ListenerHandle { custom_id }
    }

    pub fn remove_listener(&mut self, handle: &ListenerHandle) -> bool {
        self.listeners.remove(&handle.custom_id).is_some()
    }

    // ------------------------------------------------------------------
    // Wire + render
    // ------------------------------------------------------------------

    /// `{content?, embeds?, components?}`, each key only when non-empty.
    ///
    /// Rows are reported as laid out, including the empty padding rows an
    /// explicit row index can leave behind. [`render`](Self::render) drops
    /// those before anything is sent.
    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        let mut map = Map::new();
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            map.insert("content".into(), Value::from(content));
        }
        if !self.embeds.is_empty() {
            map.insert("embeds".into(), serde_json::to_value(&self.embeds)?);
        }
        if !self.rows.is_empty() {
            let rows = self
                .rows
                .iter()
                .map(ActionRow::to_wire)
                .collect::<Result<Vec<_>, _>>()?;
            map.insert("components".into(), Value::Array(rows));
        }
        Ok(Value::Object(map))
    }

    /// Validate the rows and bind listeners into a fresh [`View`].
    ///
    /// Text inputs only live in modals and are left out.
    pub fn render(&mut self) -> Result<&View, ComponentError> {
        let mut view = View::new(self.timeout);
        for row in &self.rows {
            row.validate()?;
            let mut rendered = ActionRow::default();
            for component in &row.components {
                if component.kind() == ComponentType::TextInput {
                    continue;
                }
                if let Some(custom_id) = component.custom_id() {
                    if let Some(callback) = self.listeners.get(custom_id) {
                        view.bind(custom_id, component.clone(), callback.clone());
                    }
                }
                rendered.components.push(component.clone());
            }
            if !rendered.is_empty() {
                view.push_row(rendered);
            }
        }
        Ok(&*self.view.insert(view))
    }

    fn resolve_view(&mut self, view: Option<View>) -> Result<View, ComponentError> {
        match view {
            Some(view) => {
                self.view = Some(view.clone());
                Ok(view)
            }
            None => self.render().cloned(),
        }
    }

    async fn register(&mut self, client: &Client, view: &View, message_id: Option<&str>) {
        client.register_view(view, message_id).await;
        self.registered = Some((view.clone(), message_id.map(str::to_string)));
    }

    fn body(&self, view: &View) -> MessagePayload {
        MessagePayload {
            content: self.content.clone(),
            embeds: (!self.embeds.is_empty()).then(|| self.embeds.clone()),
            components: Some(view.rows().to_vec()),
            flags: None,
        }
    }

    // ------------------------------------------------------------------
    // Send / edit
    // ------------------------------------------------------------------

    /// Send the message and start routing its components.
    ///
    /// Returns the created message, or `None` when it went out as an
    /// interaction's initial response (the host doesn't echo those).
    pub async fn send(
        &mut self,
        client: &Client,
        target: SendTarget,
        options: SendOptions,
    ) -> Result<Option<Message>, ComponentError> {
        let view = self.resolve_view(options.view)?;
        let mut body = self.body(&view);

        match target {
            SendTarget::Channel(channel_id) => {
                debug!(channel_id = %channel_id, rows = view.rows().len(), "sending component message");
                let message = client.host().create_message(&channel_id, &body).await?;
                self.register(client, &view, Some(&message.id)).await;
                self.message = Some(message.clone());
                self.interaction = None;
                Ok(Some(message))
            }
            SendTarget::Interaction(handle) => {
                if options.ephemeral {
                    body = body.ephemeral();
                }
                if !handle.is_done() {
                    let response = InteractionResponse::new(
                        InteractionCallbackType::ChannelMessageWithSource,
                        Some(body.into()),
                    );
                    client.respond(&handle, &response).await?;
                    self.register(client, &view, None).await;
                    self.message = None;
                    self.interaction = Some(handle);
                    return Ok(None);
                }

                let interaction = handle.interaction();
                debug!(interaction_id = %interaction.id, "sending component follow-up");
                let message = client
                    .host()
                    .create_followup_message(&interaction.application_id, &interaction.token, &body)
                    .await?;
                self.register(client, &view, Some(&message.id)).await;
                self.message = Some(message.clone());
                self.interaction = None;
                Ok(Some(message))
            }
        }
    }

    /// Push the current content and rows to the already-sent message.
    ///
    /// Pass [`View::empty()`] to strip all components.
    pub async fn edit(
        &mut self,
        client: &Client,
        view: Option<View>,
    ) -> Result<Option<Message>, ComponentError> {
        if self.message.is_none() && self.interaction.is_none() {
            return Err(ComponentError::State(
                "component message has not been sent yet".into(),
            ));
        }
        let view = self.resolve_view(view)?;
        let body = self.body(&view);

        if let Some(message) = &self.message {
            debug!(message_id = %message.id, "editing component message");
            let edited = client
                .host()
                .edit_message(&message.channel_id, &message.id, &body)
                .await?;
            self.register(client, &view, Some(&edited.id)).await;
            self.message = Some(edited.clone());
            return Ok(Some(edited));
        }

        let Some(handle) = self.interaction.clone() else {
            return Ok(None);
        };
        let interaction = handle.interaction();
        let edited = if handle.is_done() {
            debug!(interaction_id = %interaction.id, "editing original response");
            client
                .host()
                .edit_original_response(&interaction.application_id, &interaction.token, &body)
                .await?
        } else {
            debug!(interaction_id = %interaction.id, "updating message through interaction");
            let response =
                InteractionResponse::new(InteractionCallbackType::UpdateMessage, Some(body.into()));
            client.respond(&handle, &response).await?;
            client
                .host()
                .get_original_response(&interaction.application_id, &interaction.token)
                .await?
        };
        // Now that the message id is known, the unpinned bindings from the
        // initial response give way to pinned ones.
        if let Some((previous, None)) = &self.registered {
            client.unregister_view(previous, None).await;
        }
        self.register(client, &view, Some(&edited.id)).await;
        Ok(Some(edited))
    }
}

impl fmt::Debug for ComponentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut listeners: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        listeners.sort_unstable();
        f.debug_struct("ComponentMessage")
            .field("content", &self.content)
            .field("embeds", &self.embeds.len())
            .field("rows", &self.rows)
            .field("listeners", &listeners)
            .field("message", &self.message.as_ref().map(|m| &m.id))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GatewayEvent;
    use crate::test_support::{component_interaction, HostCall, RecordingHost};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn client() -> (Arc<RecordingHost>, Client) {
        let host = Arc::new(RecordingHost::default());
        (host.clone(), Client::new(host))
    }

    fn buttons(message: &mut ComponentMessage, ids: impl IntoIterator<Item = usize>) {
        for i in ids {
            message
                .add_component(Button::new(format!("b{i}")), None)
                .unwrap();
        }
    }

    fn row_lens(message: &ComponentMessage) -> Vec<usize> {
        message.rows().iter().map(ActionRow::len).collect()
    }

    fn count_clicks(
        message: &mut ComponentMessage,
        custom_id: &str,
        hits: &Arc<AtomicUsize>,
    ) -> ListenerHandle {
        let hits = hits.clone();
        message.on_interaction(custom_id, move |_ctx| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    fn click_on(message_id: &str, custom_id: &str) -> GatewayEvent {
        let mut click = component_interaction(custom_id, 2);
        if let Some(m) = click.message.as_mut() {
            m.id = message_id.to_string();
        }
        GatewayEvent::InteractionCreate(click)
    }

    // -- Layout ------------------------------------------------------------

    #[test]
    fn auto_placement_fills_a_row_before_opening_the_next() {
        let mut message = ComponentMessage::new();
        buttons(&mut message, 0..5);
        assert_eq!(row_lens(&message), vec![5]);

        buttons(&mut message, 5..6);
        assert_eq!(row_lens(&message), vec![5, 1]);
    }

    #[test]
    fn auto_placement_stops_at_five_full_rows() {
        let mut message = ComponentMessage::new();
        buttons(&mut message, 0..25);
        let err = message.add_component(Button::new("extra"), None).unwrap_err();
        assert!(matches!(err, ComponentError::Capacity(_)));
        assert_eq!(row_lens(&message), vec![5; 5]);
    }

    #[test]
    fn explicit_row_pads_with_empty_rows() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a"), Some(2)).unwrap();
        assert_eq!(row_lens(&message), vec![0, 0, 1]);
    }

    #[test]
    fn explicit_row_out_of_range_is_rejected() {
        let mut message = ComponentMessage::new();
        let err = message.add_component(Button::new("a"), Some(5)).unwrap_err();
        assert!(matches!(err, ComponentError::Capacity(_)));
        assert!(message.rows().is_empty());
    }

    #[test]
    fn sixth_component_in_an_explicit_row_is_rejected() {
        let mut message = ComponentMessage::new();
        for i in 0..5 {
            message
                .add_component(Button::new(format!("b{i}")), Some(1))
                .unwrap();
        }
        let err = message.add_component(Button::new("b5"), Some(1)).unwrap_err();
        assert!(matches!(err, ComponentError::Capacity(_)));
    }

    #[test]
    fn component_row_hint_acts_as_explicit_row() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a").row(1), None).unwrap();
        message
            .add_component(SelectMenu::new("m", Vec::new()).row(3), None)
            .unwrap();
        assert_eq!(row_lens(&message), vec![0, 1, 0, 1]);

        // An explicit row wins over the hint.
        message.add_component(Button::new("b").row(1), Some(0)).unwrap();
        assert_eq!(row_lens(&message), vec![1, 1, 0, 1]);
    }

    #[test]
    fn sixth_row_is_rejected() {
        let mut message =
            ComponentMessage::with_rows(vec![ActionRow::default().with(Button::new("a")); 5]).unwrap();
        let err = message
            .add_row(ActionRow::default().with(Button::new("b")))
            .unwrap_err();
        assert!(matches!(err, ComponentError::Capacity(_)));

        let err = ComponentMessage::with_rows(vec![ActionRow::default(); 6]).unwrap_err();
        assert!(matches!(err, ComponentError::Capacity(_)));
    }

    #[test]
    fn remove_component_drops_emptied_row() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a"), Some(0)).unwrap();
        message.add_component(Button::new("b"), Some(1)).unwrap();
        message.add_component(Button::new("c"), Some(1)).unwrap();

        assert!(message.remove_component("a"));
        assert_eq!(row_lens(&message), vec![2]);
        assert!(message.remove_component("b"));
        assert_eq!(row_lens(&message), vec![1]);
        assert!(!message.remove_component("missing"));
    }

    #[test]
    fn clear_components_resets_rows() {
        let mut message = ComponentMessage::new();
        buttons(&mut message, 0..7);
        message.clear_components();
        assert!(message.rows().is_empty());
    }

    // -- Wire + render -----------------------------------------------------

    #[test]
    fn to_wire_omits_empty_keys() {
        let message = ComponentMessage::new();
        assert_eq!(message.to_wire().unwrap(), json!({}));

        let mut message = ComponentMessage::new().content("hello");
        message.add_component(Button::new("a"), None).unwrap();
        assert_eq!(
            message.to_wire().unwrap(),
            json!({
                "content": "hello",
                "components": [{
                    "type": 1,
                    "components": [{ "type": 2, "style": 2, "disabled": false, "custom_id": "a" }],
                }],
            })
        );
    }

    #[test]
    fn to_wire_keeps_padding_rows_that_render_drops() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a"), Some(1)).unwrap();
        assert_eq!(
            message.to_wire().unwrap()["components"],
            json!([
                { "type": 1, "components": [] },
                {
                    "type": 1,
                    "components": [{ "type": 2, "style": 2, "disabled": false, "custom_id": "a" }],
                },
            ])
        );
        assert_eq!(message.render().unwrap().rows().len(), 1);
    }

    #[test]
    fn to_wire_surfaces_invalid_components() {
        let mut message = ComponentMessage::new();
        message
            .add_component(Button::link("https://example.com").custom_id("a"), None)
            .unwrap();
        assert!(matches!(message.to_wire(), Err(ComponentError::Config(_))));
        assert!(matches!(message.render(), Err(ComponentError::Config(_))));
    }

    #[test]
    fn render_binds_only_listened_components() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a"), None).unwrap();
        message.add_component(Button::new("b"), None).unwrap();
        message
            .add_component(Button::link("https://example.com"), None)
            .unwrap();
        message.on_interaction("a", |_ctx| async { Ok(()) });
        message.on_interaction("ghost", |_ctx| async { Ok(()) });

        let view = message.render().unwrap();
        assert!(view.is_bound("a"));
        assert!(!view.is_bound("b"));
        assert!(!view.is_bound("ghost"));
        assert_eq!(view.rows()[0].len(), 3);
        assert_eq!(view.timeout(), Some(DEFAULT_VIEW_TIMEOUT));
        assert!(message.view().is_some());
    }

    #[test]
    fn render_leaves_out_text_inputs() {
        let mut message = ComponentMessage::new();
        message
            .add_component(TextInput::new("t", "Title"), Some(0))
            .unwrap();
        message.add_component(Button::new("a"), Some(1)).unwrap();
        let view = message.render().unwrap();
        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].components[0].custom_id(), Some("a"));
    }

    #[test]
    fn removed_listener_is_not_bound() {
        let mut message = ComponentMessage::new();
        message.add_component(Button::new("a"), None).unwrap();
        let handle = message.on_interaction("a", |_ctx| async { Ok(()) });
        assert_eq!(handle.custom_id(), "a");
        assert!(message.remove_listener(&handle));
        assert!(!message.remove_listener(&handle));
        assert!(!message.render().unwrap().is_bound("a"));
    }

    // -- Send --------------------------------------------------------------

    #[tokio::test]
    async fn channel_send_creates_message_and_routes_clicks() {
        let (host, client) = client();
        let hits = Arc::new(AtomicUsize::new(0));

        let mut message = ComponentMessage::new().content("menu");
        message.add_component(Button::new("a"), None).unwrap();
        {
            let hits = hits.clone();
            message.on_interaction("a", move |ctx| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    ctx.defer(false).await?;
                    Ok(())
                }
            });
        }

        let sent = message
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap()
            .expect("channel sends return the message");
        assert_eq!(message.message().map(|m| &m.id), Some(&sent.id));

        match host.calls().as_slice() {
            [HostCall::CreateMessage { channel_id, body }] => {
                assert_eq!(channel_id, "chan");
                assert_eq!(body.content.as_deref(), Some("menu"));
                assert_eq!(body.components.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("unexpected calls {other:?}"),
        }

        // Clicks must come from the sent message.
        let mut click = component_interaction("a", 2);
        if let Some(m) = click.message.as_mut() {
            m.id = sent.id.clone();
        }
        client.dispatch(GatewayEvent::InteractionCreate(click)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(matches!(
            host.calls().last(),
            Some(HostCall::InteractionResponse { .. })
        ));
    }

    #[tokio::test]
    async fn interaction_send_uses_response_then_followup() {
        let (host, client) = client();
        let handle = InteractionHandle::new(component_interaction("a", 2));

        let mut first = ComponentMessage::new().content("one");
        let sent = first
            .send(
                &client,
                handle.clone().into(),
                SendOptions {
                    ephemeral: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(sent.is_none());
        assert!(handle.is_done());

        let mut second = ComponentMessage::new().content("two");
        let sent = second
            .send(&client, handle.into(), SendOptions::default())
            .await
            .unwrap();
        assert!(sent.is_some());

        match host.calls().as_slice() {
            [HostCall::InteractionResponse { response, .. }, HostCall::Followup { application_id, body }] =>
            {
                assert_eq!(response.kind, InteractionCallbackType::ChannelMessageWithSource);
                assert_eq!(response.data.as_ref().and_then(|d| d.flags), Some(64));
                assert_eq!(application_id, "600");
                assert_eq!(body.content.as_deref(), Some("two"));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_with_view_override_skips_render() {
        let (host, client) = client();
        let mut message = ComponentMessage::new().content("bare");
        message.add_component(Button::new("a"), None).unwrap();

        message
            .send(
                &client,
                SendTarget::Channel("chan".into()),
                SendOptions {
                    view: Some(View::empty()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        match host.calls().as_slice() {
            [HostCall::CreateMessage { body, .. }] => {
                assert_eq!(body.components.as_deref(), Some(&[][..]));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_send_binds_nothing() {
        let (host, client) = client();
        let mut message = ComponentMessage::new().content("x");
        host.fail_next();
        let err = message
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ComponentError::Http(_)));
        assert!(message.message().is_none());
        assert!(matches!(
            message.edit(&client, None).await,
            Err(ComponentError::State(_))
        ));
    }

    // -- Edit --------------------------------------------------------------

    #[tokio::test]
    async fn edit_before_send_is_a_state_error() {
        let (host, client) = client();
        let mut message = ComponentMessage::new();
        let err = message.edit(&client, None).await.unwrap_err();
        assert!(matches!(err, ComponentError::State(_)));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn edit_after_channel_send_edits_the_message() {
        let (host, client) = client();
        let mut message = ComponentMessage::new().content("v1");
        let sent = message
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap()
            .unwrap();

        message.content = Some("v2".into());
        message.edit(&client, Some(View::empty())).await.unwrap();

        match host.calls().last() {
            Some(HostCall::EditMessage {
                channel_id,
                message_id,
                body,
            }) => {
                assert_eq!(channel_id, "chan");
                assert_eq!(message_id, &sent.id);
                assert_eq!(body.content.as_deref(), Some("v2"));
                assert_eq!(body.components.as_deref(), Some(&[][..]));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn edit_after_interaction_response_edits_the_original() {
        let (host, client) = client();
        let handle = InteractionHandle::new(component_interaction("a", 2));
        let mut message = ComponentMessage::new().content("v1");
        message
            .send(&client, handle.into(), SendOptions::default())
            .await
            .unwrap();

        message.content = Some("v2".into());
        let edited = message.edit(&client, None).await.unwrap().unwrap();
        assert_eq!(edited.content, "v2");
        assert!(matches!(host.calls().last(), Some(HostCall::EditOriginal { .. })));
    }

    #[tokio::test]
    async fn edit_through_fresh_interaction_updates_in_place() {
        let (host, client) = client();
        let mut message = ComponentMessage::new().content("updated");
        message.add_component(Button::new("a"), None).unwrap();
        message.bind_interaction(InteractionHandle::new(component_interaction("a", 2)));

        message.edit(&client, None).await.unwrap();

        match host.calls().as_slice() {
            [HostCall::InteractionResponse { response, .. }, HostCall::GetOriginal { .. }] => {
                assert_eq!(response.kind, InteractionCallbackType::UpdateMessage);
                let data = response.data.as_ref().expect("update data");
                assert_eq!(data.content.as_deref(), Some("updated"));
                assert_eq!(data.components.as_ref().map(Vec::len), Some(1));
            }
            other => panic!("unexpected calls {other:?}"),
        }
        assert!(message.interaction().is_some_and(InteractionHandle::is_done));
    }

    // -- Routing after send / edit ------------------------------------------

    #[tokio::test]
    async fn messages_reusing_a_custom_id_keep_their_own_callbacks() {
        let (_host, client) = client();
        let first_hits = Arc::new(AtomicUsize::new(0));
        let second_hits = Arc::new(AtomicUsize::new(0));

        let mut first = ComponentMessage::new().content("poll");
        first.add_component(Button::new("yes"), None).unwrap();
        count_clicks(&mut first, "yes", &first_hits);
        let first_sent = first
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap()
            .unwrap();

        let mut second = ComponentMessage::new().content("poll");
        second.add_component(Button::new("yes"), None).unwrap();
        count_clicks(&mut second, "yes", &second_hits);
        let second_sent = second
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(first_sent.id, second_sent.id);

        assert_eq!(client.dispatch(click_on(&first_sent.id, "yes")).await, 1);
        assert_eq!(first_hits.load(Ordering::SeqCst), 1);
        assert_eq!(second_hits.load(Ordering::SeqCst), 0);

        assert_eq!(client.dispatch(click_on(&second_sent.id, "yes")).await, 1);
        assert_eq!(first_hits.load(Ordering::SeqCst), 1);
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn edit_drops_callbacks_the_new_view_no_longer_binds() {
        let (_host, client) = client();
        let hits = Arc::new(AtomicUsize::new(0));

        let mut message = ComponentMessage::new().content("menu");
        message.add_component(Button::new("a"), None).unwrap();
        message.add_component(Button::new("b"), None).unwrap();
        let listener = count_clicks(&mut message, "a", &hits);
        count_clicks(&mut message, "b", &hits);
        let sent = message
            .send(&client, SendTarget::Channel("chan".into()), SendOptions::default())
            .await
            .unwrap()
            .unwrap();

        assert!(message.remove_listener(&listener));
        message.edit(&client, None).await.unwrap();
        assert!(!message.view().unwrap().is_bound("a"));
        assert_eq!(client.dispatch(click_on(&sent.id, "a")).await, 0);

        assert!(message.remove_component("b"));
        message.edit(&client, None).await.unwrap();
        assert_eq!(client.dispatch(click_on(&sent.id, "b")).await, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn editing_an_interaction_response_pins_its_bindings() {
        let (_host, client) = client();
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = InteractionHandle::new(component_interaction("open", 2));

        let mut message = ComponentMessage::new().content("menu");
        message.add_component(Button::new("a"), None).unwrap();
        let listener = count_clicks(&mut message, "a", &hits);
        message
            .send(&client, handle.into(), SendOptions::default())
            .await
            .unwrap();
        // The response's message id is unknown, so any message routes.
        assert_eq!(client.dispatch(click_on("anything", "a")).await, 1);

        assert!(message.remove_listener(&listener));
        let edited = message.edit(&client, None).await.unwrap().unwrap();
        assert_eq!(client.dispatch(click_on(&edited.id, "a")).await, 0);
        assert_eq!(client.dispatch(click_on("anything", "a")).await, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(client.bound_view_count().await, 0);
    }
}
