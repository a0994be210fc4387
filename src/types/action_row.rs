//! Horizontal grouping of up to five components.

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::ComponentError;
use crate::types::component::{read_tag, Component, ComponentType};

/// Discord allows at most this many components per row.
pub const MAX_ROW_COMPONENTS: usize = 5;

/// An ordered row of components. Rows may mix component kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Append a component, builder style. Capacity is checked on serialise.
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.components.len() >= MAX_ROW_COMPONENTS
    }

    /// Check capacity and every child's own invariants.
    pub fn validate(&self) -> Result<(), ComponentError> {
        self.check_capacity()?;
        self.components.iter().try_for_each(Component::validate)
    }

    fn check_capacity(&self) -> Result<(), ComponentError> {
        if self.components.len() > MAX_ROW_COMPONENTS {
            return Err(ComponentError::Capacity(format!(
                "action row holds {} components, at most {} are allowed",
                self.components.len(),
                MAX_ROW_COMPONENTS
            )));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value, ComponentError> {
        self.check_capacity()?;
        let components = self
            .components
            .iter()
            .map(Component::to_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "type": ComponentType::ActionRow.tag(),
            "components": components,
        }))
    }

    pub fn from_wire(value: &Value) -> Result<Self, ComponentError> {
        let tag = read_tag(value)?;
        if ComponentType::from_tag(tag)? != ComponentType::ActionRow {
            return Err(ComponentError::Decode(format!(
                "expected an action row, got component type {tag}"
            )));
        }
        let children = value
            .get("components")
            .and_then(Value::as_array)
            .ok_or_else(|| ComponentError::Decode("action row without `components`".into()))?;
        let components = children
            .iter()
            .map(Component::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl Serialize for ActionRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ActionRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ActionRow::from_wire(&value).map_err(de::Error::custom)
    }
}
