//! Typed gateway events.
//!
//! Only `INTERACTION_CREATE` matters to the component layer; the gateway
//! connection itself belongs to the host. Everything else is carried as
//! [`GatewayEvent::Unknown`] so callers can still inspect it.

use serde::Deserialize;
use tracing::warn;

use crate::types::*;

/// Gateway opcode for dispatch events.
const OP_DISPATCH: u8 = 0;

/// A parsed event coming off the Discord gateway.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// A user used a slash command, clicked a button, picked from a select
    /// menu, or submitted a modal.
    InteractionCreate(Interaction),

    /// An event without a typed variant, with its name and raw JSON.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<serde_json::Value>,
    },
}

impl GatewayEvent {
    /// Convert a raw [`GatewayPayload`] into a typed event.
    ///
    /// Never fails: unrecognised or malformed events become
    /// [`GatewayEvent::Unknown`].
    pub fn from_payload(payload: GatewayPayload) -> Self {
        let GatewayPayload { op, d, t, .. } = payload;
        let is_interaction = op == OP_DISPATCH && t.as_deref() == Some("INTERACTION_CREATE");

        match d {
            Some(d) if is_interaction => match serde_json::from_value::<Interaction>(d.clone()) {
                Ok(interaction) => GatewayEvent::InteractionCreate(interaction),
                Err(e) => {
                    warn!(
                        event = "INTERACTION_CREATE",
                        error = %e,
                        "failed to parse INTERACTION_CREATE payload"
                    );
                    GatewayEvent::Unknown {
                        event_name: t,
                        op,
                        data: Some(d),
                    }
                }
            },
            data => GatewayEvent::Unknown {
                event_name: t,
                op,
                data,
            },
        }
    }

    /// If this is an `Unknown` event, try to deserialise its `data` field.
    pub fn try_parse_data<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        match self {
            GatewayEvent::Unknown { data: Some(d), .. } => serde_json::from_value(d.clone()).ok(),
            _ => None,
        }
    }
}
