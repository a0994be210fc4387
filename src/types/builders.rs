//! Builder patterns for ergonomic type construction.
//!
//! The component helper functions (`action_row`, `button`, `link_button`,
//! `string_select`, `text_input`) build the [`Component`] variants directly,
//! hiding the per-variant struct construction.

use crate::types::action_row::ActionRow;
use crate::types::component::{
    Button, ButtonStyle, Component, SelectMenu, SelectOption, TextInput, TextInputStyle,
};
use crate::types::embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};

// ===========================================================================
// Embed builder
// ===========================================================================

/// Ergonomic builder for [`Embed`].
///
/// ```ignore
/// let embed = EmbedBuilder::new()
///     .title("Hello")
///     .description("World")
///     .color(0x00FF00)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct EmbedBuilder {
    inner: Embed,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = Some(desc.into());
        self
    }

    /// Set the embed color (as a 24-bit RGB integer, e.g. `0xFF6600`).
    pub fn color(mut self, color: u32) -> Self {
        self.inner.color = Some(color);
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.inner.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.inner.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.inner.thumbnail = Some(EmbedMedia { url: url.into() });
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.inner.image = Some(EmbedMedia { url: url.into() });
        self
    }

    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.inner.author = Some(EmbedAuthor {
            name: name.into(),
            url: None,
            icon_url: None,
        });
        self
    }

    /// Set the embed timestamp (ISO 8601 string).
    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.inner.timestamp = Some(ts.into());
        self
    }

    pub fn build(self) -> Embed {
        self.inner
    }
}

// ===========================================================================
// Component helper functions
// ===========================================================================

/// Build an Action Row wrapping other components.
pub fn action_row(components: Vec<Component>) -> ActionRow {
    ActionRow::new(components)
}

/// Build a labelled button.
///
/// For link buttons use [`link_button`] instead.
pub fn button(style: ButtonStyle, label: impl Into<String>, custom_id: impl Into<String>) -> Component {
    Button::new(custom_id).style(style).label(label).into()
}

/// Build a link button (style 5, no custom_id, requires url).
pub fn link_button(label: impl Into<String>, url: impl Into<String>) -> Component {
    Button::link(url).label(label).into()
}

/// Build a single-choice string select menu.
pub fn string_select(
    custom_id: impl Into<String>,
    placeholder: impl Into<String>,
    options: Vec<SelectOption>,
) -> Component {
    SelectMenu::new(custom_id, options)
        .placeholder(placeholder)
        .into()
}

/// Build a text input for use inside a modal.
pub fn text_input(
    custom_id: impl Into<String>,
    label: impl Into<String>,
    style: TextInputStyle,
    required: bool,
) -> Component {
    TextInput::new(custom_id, label)
        .style(style)
        .required(required)
        .into()
}

// ===========================================================================
// Tests
// ===========================================================================
