//! Interactive message components: buttons, select menus, and text inputs.
//!
//! Every component serialises to the wire dictionary Discord expects, with a
//! fixed numeric `type` tag per variant. Validation that the platform would
//! otherwise reject (link buttons with a `custom_id`, oversized option lists)
//! happens in [`Component::to_wire`] before anything leaves the process.

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::error::ComponentError;
use crate::types::util::{default_one, default_true, snowflake, Snowflake, ValueExt};

/// Discord rejects select menus with more options than this.
pub const MAX_SELECT_OPTIONS: usize = 25;

// ---------------------------------------------------------------------------
// Type tags and styles
// ---------------------------------------------------------------------------

/// Numeric `type` tag carried by every component on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    ActionRow = 1,
    Button = 2,
    SelectMenu = 3,
    TextInput = 4,
}

impl ComponentType {
    /// Map a raw wire tag to a known type.
    pub fn from_tag(tag: u64) -> Result<Self, ComponentError> {
        match tag {
            1 => Ok(Self::ActionRow),
            2 => Ok(Self::Button),
            3 => Ok(Self::SelectMenu),
            4 => Ok(Self::TextInput),
            other => Err(ComponentError::UnknownComponentType(other)),
        }
    }

    /// The raw wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Visual style of a [`Button`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    Primary = 1,
    #[default]
    Secondary = 2,
    Success = 3,
    Danger = 4,
    /// Navigates to a URL; never produces an interaction.
    Link = 5,
}

/// Single-line or multi-line [`TextInput`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TextInputStyle {
    #[default]
    Short = 1,
    Paragraph = 2,
}

// ---------------------------------------------------------------------------
// Emoji
// ---------------------------------------------------------------------------

/// Emoji shown on a button or select option.
///
/// A unicode emoji goes on the wire as `{name}`; a custom guild emoji as
/// `{name, id, animated}`. On decode, the presence of `id` picks the custom
/// branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentEmoji {
    Custom {
        name: Option<String>,
        #[serde(deserialize_with = "snowflake")]
        id: Snowflake,
        #[serde(default)]
        animated: bool,
    },
    Unicode {
        name: String,
    },
}

impl ComponentEmoji {
    /// A custom guild emoji.
    pub fn custom(name: impl Into<String>, id: impl Into<Snowflake>, animated: bool) -> Self {
        ComponentEmoji::Custom {
            name: Some(name.into()),
            id: id.into(),
            animated,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ComponentEmoji::Custom { name, .. } => name.as_deref(),
            ComponentEmoji::Unicode { name } => Some(name),
        }
    }
}

impl From<&str> for ComponentEmoji {
    fn from(name: &str) -> Self {
        ComponentEmoji::Unicode {
            name: name.to_string(),
        }
    }
}

impl From<String> for ComponentEmoji {
    fn from(name: String) -> Self {
        ComponentEmoji::Unicode { name }
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// Link buttons carry a `url` and must not carry a `custom_id`; every other
/// style is identified by its `custom_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<ComponentEmoji>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// Placement hint (0..=4) used when the button is added to a message
    /// without an explicit row. Not part of the wire format.
    #[serde(skip)]
    pub row: Option<u8>,
}

impl Button {
    /// A secondary-style button identified by `custom_id`.
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            style: ButtonStyle::Secondary,
            label: None,
            emoji: None,
            url: None,
            custom_id: Some(custom_id.into()),
            disabled: false,
            row: None,
        }
    }

    /// A link-style button pointing at `url`.
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            style: ButtonStyle::Link,
            label: None,
            emoji: None,
            url: Some(url.into()),
            custom_id: None,
            disabled: false,
            row: None,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn emoji(mut self, emoji: impl Into<ComponentEmoji>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn row(mut self, row: u8) -> Self {
        self.row = Some(row);
        self
    }

    /// Check the url / custom_id / style invariant.
    pub fn validate(&self) -> Result<(), ComponentError> {
        if self.url.is_some() {
            if self.custom_id.is_some() {
                return Err(ComponentError::Config(
                    "button with a url cannot have a custom_id".into(),
                ));
            }
            if self.style != ButtonStyle::Link {
                return Err(ComponentError::Config(
                    "button with a url must use the link style".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        self.validate()?;
        tagged(ComponentType::Button, self)
    }

    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        expect_tag(value, ComponentType::Button)?;
        Ok(value.clone().deserialize_into()?)
    }
}

// ---------------------------------------------------------------------------
// Select menu
// ---------------------------------------------------------------------------

/// One choice inside a [`SelectMenu`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<ComponentEmoji>,
    #[serde(default)]
    pub default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn emoji(mut self, emoji: impl Into<ComponentEmoji>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Pre-select this option.
    pub fn is_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        Ok(value.clone().deserialize_into()?)
    }
}

/// A dropdown of up to [`MAX_SELECT_OPTIONS`] string options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMenu {
    pub custom_id: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default = "default_one")]
    pub min_values: u8,
    #[serde(default = "default_one")]
    pub max_values: u8,
    #[serde(default)]
    pub disabled: bool,
    /// Values the user picked. Only populated on menus rebuilt from an
    /// inbound interaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Placement hint (0..=4), see [`Button::row`].
    #[serde(skip)]
    pub row: Option<u8>,
}

impl SelectMenu {
    pub fn new(custom_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            custom_id: custom_id.into(),
            options,
            placeholder: None,
            min_values: 1,
            max_values: 1,
            disabled: false,
            values: Vec::new(),
            row: None,
        }
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_values(mut self, min: u8) -> Self {
        self.min_values = min;
        self
    }

    pub fn max_values(mut self, max: u8) -> Self {
        self.max_values = max;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn row(mut self, row: u8) -> Self {
        self.row = Some(row);
        self
    }

    pub fn validate(&self) -> Result<(), ComponentError> {
        if self.options.len() > MAX_SELECT_OPTIONS {
            return Err(ComponentError::Config(format!(
                "select menu `{}` has {} options, at most {} are allowed",
                self.custom_id,
                self.options.len(),
                MAX_SELECT_OPTIONS
            )));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        self.validate()?;
        tagged(ComponentType::SelectMenu, self)
    }

    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        expect_tag(value, ComponentType::SelectMenu)?;
        Ok(value.clone().deserialize_into()?)
    }
}

// ---------------------------------------------------------------------------
// Text input
// ---------------------------------------------------------------------------

/// A text field, used inside modals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    #[serde(default)]
    pub style: TextInputStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    #[serde(default = "default_true")]
    pub required: bool,
    /// Pre-filled text; `value` on the wire.
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl TextInput {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style: TextInputStyle::Short,
            placeholder: None,
            min_length: None,
            max_length: None,
            required: true,
            default: None,
            disabled: false,
        }
    }

    pub fn style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn length(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        tagged(ComponentType::TextInput, self)
    }

    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        expect_tag(value, ComponentType::TextInput)?;
        Ok(value.clone().deserialize_into()?)
    }
}

// ---------------------------------------------------------------------------
// The component enum
// ---------------------------------------------------------------------------

/// Any component that can sit inside an [`ActionRow`](super::ActionRow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
}

impl Component {
    pub fn kind(&self) -> ComponentType {
        match self {
            Component::Button(_) => ComponentType::Button,
            Component::SelectMenu(_) => ComponentType::SelectMenu,
            Component::TextInput(_) => ComponentType::TextInput,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Component::Button(b) => b.custom_id.as_deref(),
            Component::SelectMenu(s) => Some(&s.custom_id),
            Component::TextInput(t) => Some(&t.custom_id),
        }
    }

    pub fn disabled(&self) -> bool {
        match self {
            Component::Button(b) => b.disabled,
            Component::SelectMenu(s) => s.disabled,
            Component::TextInput(t) => t.disabled,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        match self {
            Component::Button(b) => b.disabled = disabled,
            Component::SelectMenu(s) => s.disabled = disabled,
            Component::TextInput(t) => t.disabled = disabled,
        }
    }

    /// The component's own placement hint, if it has one.
    pub fn row(&self) -> Option<u8> {
        match self {
            Component::Button(b) => b.row,
            Component::SelectMenu(s) => s.row,
            Component::TextInput(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ComponentError> {
        match self {
            Component::Button(b) => b.validate(),
            Component::SelectMenu(s) => s.validate(),
            Component::TextInput(_) => Ok(()),
        }
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        match self {
            Component::Button(b) => b.to_wire(),
            Component::SelectMenu(s) => s.to_wire(),
            Component::TextInput(t) => t.to_wire(),
        }
    }

    /// Decode a single component, dispatching on its `type` tag.
    ///
    /// Action rows are not components; a nested row tag is rejected as
    /// [`ComponentError::UnknownComponentType`].
    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        let tag = read_tag(value)?;
        match ComponentType::from_tag(tag)? {
            ComponentType::Button => Button::from_wire(value).map(Component::Button),
            ComponentType::SelectMenu => SelectMenu::from_wire(value).map(Component::SelectMenu),
            ComponentType::TextInput => TextInput::from_wire(value).map(Component::TextInput),
            ComponentType::ActionRow => Err(ComponentError::UnknownComponentType(tag)),
        }
    }
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Component::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Component::SelectMenu(menu)
    }
}

impl From<TextInput> for Component {
    fn from(input: TextInput) -> Self {
        Component::TextInput(input)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Component::from_wire(&value).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Wire helpers
// ---------------------------------------------------------------------------

pub(crate) fn read_tag(value: &Value) -> Result<u64, ComponentError> {
    value
        .get("type")
        .and_then(Value::as_u64)
        .ok_or_else(|| ComponentError::Decode("missing numeric `type` tag".into()))
}

/// Reject a dictionary tagged as some other component type. A missing tag
/// is accepted so bare variant dictionaries still decode.
fn expect_tag(value: &Value, expected: ComponentType) -> Result<(), ComponentError> {
    match value.get("type").and_then(Value::as_u64) {
        Some(tag) if tag != u64::from(expected.tag()) => {
            ComponentType::from_tag(tag)?;
            Err(ComponentError::Decode(format!(
                "expected component type {}, got {}",
                expected.tag(),
                tag
            )))
        }
        _ => Ok(()),
    }
}

/// Serialise `value` and stamp the wire `type` tag onto it.
pub(crate) fn tagged<T: Serialize>(kind: ComponentType, value: &T) -> Result<Value, ComponentError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.insert("type".into(), Value::from(kind.tag()));
            Ok(Value::Object(map))
        }
        other => Err(ComponentError::Decode(format!(
            "component serialised to a non-object: {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
