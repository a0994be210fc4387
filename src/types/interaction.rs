//! Inbound objects: users, messages, and component interactions.
//!
//! Only the fields this crate reads are modelled; unknown fields are ignored
//! on decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::ComponentError;
use crate::types::action_row::ActionRow;
use crate::types::component::ComponentEmoji;
use crate::types::embed::Embed;
use crate::types::util::Snowflake;

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

// ---------------------------------------------------------------------------
// User / member
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// Returns the CDN URL for the user's avatar, or `None` if no avatar is set.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            format!(
                "https://cdn.discordapp.com/avatars/{}/{}.png",
                self.id, hash
            )
        })
    }

    /// `Username#Discriminator` or just `Username` for the new username system.
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some("0") | None => self.username.clone(),
            Some(disc) => format!("{}#{}", self.username, disc),
        }
    }
}

/// Guild member attached to interactions triggered inside a guild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Member {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub embeds: Vec<Embed>,
    /// Raw component rows. Decode with [`Message::action_rows`]; kept raw so
    /// messages carrying component kinds this crate doesn't model still parse.
    #[serde(default)]
    pub components: Vec<Value>,
    #[serde(default)]
    pub flags: Option<u64>,
}

impl Message {
    /// Decode this message's component rows.
    pub fn action_rows(&self) -> Result<Vec<ActionRow>, ComponentError> {
        self.components.iter().map(ActionRow::from_wire).collect()
    }

    /// Creation time derived from the message snowflake.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let sf = self.id.parse::<u64>().ok()?;
        let ms = (sf >> 22) + DISCORD_EPOCH_MS;
        DateTime::from_timestamp_millis(i64::try_from(ms).ok()?)
    }
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
}

/// Top-level interaction received via INTERACTION_CREATE.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Interaction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub user: Option<User>,
    pub token: String,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Interaction {
    /// The user who triggered the interaction.
    ///
    /// In a guild the user is nested inside `member`; in a DM it sits at the
    /// top level.
    pub fn author(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn is_component(&self) -> bool {
        self.kind == InteractionType::MessageComponent
    }
}

/// The `data` object of a component interaction.
///
/// Besides the documented `custom_id` / `component_type` / `values`, some
/// hosts echo a subset of the clicked component (`style`, `label`, `emoji`,
/// `min_values`, `max_values`); those are picked up when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InteractionData {
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub component_type: Option<u8>,
    /// Selected values from a select menu.
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<ComponentEmoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
}
