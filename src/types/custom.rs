//! Outbound bodies: message payloads, interaction responses, and the raw
//! gateway envelope.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::types::action_row::ActionRow;
use crate::types::embed::Embed;

// ---------------------------------------------------------------------------
// Gateway payload (the raw WebSocket envelope)
// ---------------------------------------------------------------------------

/// Raw gateway payload envelope.
///
/// Every message on the Discord WebSocket is wrapped in this structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayPayload {
    pub op: u8,
    pub d: Option<serde_json::Value>,
    pub s: Option<u64>,
    pub t: Option<String>,
}

// ---------------------------------------------------------------------------
// Message flags
// ---------------------------------------------------------------------------

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u64 {
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Only the invoking user can see the message.
        const EPHEMERAL = 1 << 6;
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

// ---------------------------------------------------------------------------
// Outbound message body
// ---------------------------------------------------------------------------

/// Body for creating or editing a message, or a follow-up.
///
/// ```ignore
/// let body = MessagePayload::new()
///     .content("Hello!")
///     .component_row(row);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl MessagePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.get_or_insert_with(Vec::new).push(embed);
        self
    }

    pub fn component_row(mut self, row: ActionRow) -> Self {
        self.components.get_or_insert_with(Vec::new).push(row);
        self
    }

    pub fn flags(mut self, flags: MessageFlags) -> Self {
        let current = MessageFlags::from_bits_truncate(self.flags.unwrap_or(0));
        self.flags = Some((current | flags).bits());
        self
    }

    pub fn ephemeral(self) -> Self {
        self.flags(MessageFlags::EPHEMERAL)
    }

    /// True when nothing visible would change.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.embeds.is_none() && self.components.is_none()
    }
}

impl From<&str> for MessagePayload {
    fn from(text: &str) -> Self {
        MessagePayload::new().content(text)
    }
}

impl From<String> for MessagePayload {
    fn from(text: String) -> Self {
        MessagePayload::new().content(text)
    }
}

// ---------------------------------------------------------------------------
// Interaction response types
// ---------------------------------------------------------------------------

/// An interaction response sent back to Discord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    pub fn new(kind: InteractionCallbackType, data: Option<InteractionCallbackData>) -> Self {
        Self { kind, data }
    }
}

/// The type of callback for an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

/// Data payload for an interaction callback.
///
/// Supports `Default` for construction with struct update syntax
/// (`..Default::default()`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionCallbackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ActionRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// For modal responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

impl From<MessagePayload> for InteractionCallbackData {
    fn from(payload: MessagePayload) -> Self {
        Self {
            content: payload.content,
            embeds: payload.embeds,
            components: payload.components,
            flags: payload.flags,
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
