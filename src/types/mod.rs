//! Discord API types used by the component layer.
//!
//! The component variants and action rows own their wire format through
//! `to_wire` / `from_wire`; everything else is plain serde. The rest of the
//! crate does `use crate::types::*`, so the commonly used items are
//! re-exported here.

/// Action rows.
pub mod action_row;

/// Builder patterns and component helper functions.
pub mod builders;

/// Buttons, select menus, text inputs.
pub mod component;

/// Outbound bodies and the gateway envelope.
pub mod custom;

/// Embeds (passed through untouched).
pub mod embed;

/// Users, messages, interactions.
pub mod interaction;

/// Serde helpers.
pub mod util;

// ---- Components -----------------------------------------------------------
pub use self::action_row::{ActionRow, MAX_ROW_COMPONENTS};
pub use self::component::{
    Button, ButtonStyle, Component, ComponentEmoji, ComponentType, SelectMenu, SelectOption,
    TextInput, TextInputStyle, MAX_SELECT_OPTIONS,
};

// ---- Inbound --------------------------------------------------------------
pub use self::interaction::{
    Interaction, InteractionData, InteractionType, Member, Message, User,
};
pub use self::util::Snowflake;

// ---- Outbound -------------------------------------------------------------
pub use self::custom::{
    GatewayPayload, InteractionCallbackData, InteractionCallbackType, InteractionResponse,
    MessageFlags, MessagePayload,
};
pub use self::embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};

// ---- Builders -------------------------------------------------------------
pub use self::builders::{
    action_row, button, link_button, string_select, text_input, EmbedBuilder,
};
