//! Per-interaction facade handed to component callbacks.

use tracing::debug;

use crate::client::Client;
use crate::error::ComponentError;
use crate::host::InteractionHandle;
use crate::types::*;

/// What a callback sees when one of its components is used.
///
/// The read-only accessors come straight from the inbound interaction.
/// [`defer`](Self::defer), [`reply`](Self::reply), [`edit`](Self::edit) and
/// [`update`](Self::update) each make exactly one host call.
#[derive(Debug, Clone)]
pub struct ComponentContext {
    client: Client,
    interaction: InteractionHandle,
    component: Component,
}

impl ComponentContext {
    pub fn new(client: Client, interaction: InteractionHandle, component: Component) -> Self {
        Self {
            client,
            interaction,
            component,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn interaction(&self) -> &InteractionHandle {
        &self.interaction
    }

    /// The component that triggered the interaction.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// The acting user: the guild member's user, else the DM user.
    pub fn user(&self) -> Option<&User> {
        self.interaction.interaction().author()
    }

    pub fn guild_id(&self) -> Option<&str> {
        self.interaction.interaction().guild_id.as_deref()
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.interaction.interaction().channel_id.as_deref()
    }

    /// The message the component is attached to.
    pub fn message(&self) -> Option<&Message> {
        self.interaction.interaction().message.as_ref()
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.component.custom_id()
    }

    /// Values picked in a select menu; empty for buttons.
    pub fn values(&self) -> &[String] {
        self.interaction
            .interaction()
            .data
            .as_ref()
            .map(|d| d.values.as_slice())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Responses
    // ------------------------------------------------------------------

    /// Acknowledge now, respond later.
    ///
    /// A non-ephemeral defer keeps the message as is (deferred update); an
    /// ephemeral one shows a private "thinking" state instead.
    pub async fn defer(&self, ephemeral: bool) -> Result<(), ComponentError> {
        let response = if ephemeral {
            InteractionResponse::new(
                InteractionCallbackType::DeferredChannelMessageWithSource,
                Some(MessagePayload::new().ephemeral().into()),
            )
        } else {
            InteractionResponse::new(InteractionCallbackType::DeferredUpdateMessage, None)
        };
        self.client.respond(&self.interaction, &response).await
    }

    /// Answer with a new message.
    pub async fn reply(&self, payload: impl Into<MessagePayload>) -> Result<(), ComponentError> {
        let payload: MessagePayload = payload.into();
        let response = InteractionResponse::new(
            InteractionCallbackType::ChannelMessageWithSource,
            Some(payload.into()),
        );
        self.client.respond(&self.interaction, &response).await
    }

    /// Edit the message this interaction belongs to.
    ///
    /// After a response this edits the original response and returns it;
    /// before one it is an in-place [`update`](Self::update).
    pub async fn edit(
        &self,
        payload: impl Into<MessagePayload>,
    ) -> Result<Option<Message>, ComponentError> {
        let payload: MessagePayload = payload.into();
        if !self.interaction.is_done() {
            self.update(payload).await?;
            return Ok(None);
        }

        let interaction = self.interaction.interaction();
        debug!(interaction_id = %interaction.id, "editing original response");
        let message = self
            .client
            .host()
            .edit_original_response(&interaction.application_id, &interaction.token, &payload)
            .await?;
        Ok(Some(message))
    }

    /// Replace the component message in place as the initial response.
    ///
    /// An empty payload clears the message content.
    pub async fn update(&self, payload: impl Into<MessagePayload>) -> Result<(), ComponentError> {
        let mut payload: MessagePayload = payload.into();
        if payload.is_empty() {
            payload.content = Some(String::new());
        }
        let response =
            InteractionResponse::new(InteractionCallbackType::UpdateMessage, Some(payload.into()));
        self.client.respond(&self.interaction, &response).await
    }

    /// Send a follow-up message once the interaction has been responded to.
    pub async fn followup(
        &self,
        payload: impl Into<MessagePayload>,
    ) -> Result<Message, ComponentError> {
        if !self.interaction.is_done() {
            return Err(ComponentError::State(
                "follow-ups need an initial response first".into(),
            ));
        }
        let payload: MessagePayload = payload.into();
        let interaction = self.interaction.interaction();
        let message = self
            .client
            .host()
            .create_followup_message(&interaction.application_id, &interaction.token, &payload)
            .await?;
        Ok(message)
    }
}
