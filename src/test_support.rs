//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::error::HttpError;
use crate::host::Host;
use crate::types::*;

/// One call made against a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateMessage {
        channel_id: String,
        body: MessagePayload,
    },
    EditMessage {
        channel_id: String,
        message_id: String,
        body: MessagePayload,
    },
    InteractionResponse {
        interaction_id: String,
        response: InteractionResponse,
    },
    Followup {
        application_id: String,
        body: MessagePayload,
    },
    EditOriginal {
        application_id: String,
        body: MessagePayload,
    },
    GetOriginal {
        application_id: String,
    },
}

/// A host that records every call and answers with synthetic messages.
#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    fail_next: AtomicBool,
    next_id: AtomicU64,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Make the next call fail with a 500.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: HostCall) -> Result<(), HttpError> {
        self.calls.lock().expect("calls lock poisoned").push(call);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(HttpError::Api {
                status: 500,
                body: "boom".into(),
                route: "test".into(),
            });
        }
        Ok(())
    }

    fn message(&self, channel_id: &str, body: Option<&MessagePayload>) -> Message {
        let id = 1000 + self.next_id.fetch_add(1, Ordering::SeqCst);
        Message {
            id: id.to_string(),
            channel_id: channel_id.to_string(),
            guild_id: None,
            author: None,
            content: body.and_then(|b| b.content.clone()).unwrap_or_default(),
            timestamp: None,
            embeds: Vec::new(),
            components: Vec::new(),
            flags: body.and_then(|b| b.flags),
        }
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn create_message(
        &self,
        channel_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        self.record(HostCall::CreateMessage {
            channel_id: channel_id.into(),
            body: body.clone(),
        })?;
        Ok(self.message(channel_id, Some(body)))
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        self.record(HostCall::EditMessage {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
            body: body.clone(),
        })?;
        let mut message = self.message(channel_id, Some(body));
        message.id = message_id.to_string();
        Ok(message)
    }

    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        _interaction_token: &str,
        response: &InteractionResponse,
    ) -> Result<(), HttpError> {
        self.record(HostCall::InteractionResponse {
            interaction_id: interaction_id.into(),
            response: response.clone(),
        })
    }

    async fn create_followup_message(
        &self,
        application_id: &str,
        _interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        self.record(HostCall::Followup {
            application_id: application_id.into(),
            body: body.clone(),
        })?;
        Ok(self.message("chan", Some(body)))
    }

    async fn edit_original_response(
        &self,
        application_id: &str,
        _interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        self.record(HostCall::EditOriginal {
            application_id: application_id.into(),
            body: body.clone(),
        })?;
        Ok(self.message("chan", Some(body)))
    }

    async fn get_original_response(
        &self,
        application_id: &str,
        _interaction_token: &str,
    ) -> Result<Message, HttpError> {
        self.record(HostCall::GetOriginal {
            application_id: application_id.into(),
        })?;
        Ok(self.message("chan", None))
    }
}

/// A component interaction as Discord would deliver it.
pub fn component_interaction(custom_id: &str, component_type: u8) -> Interaction {
    serde_json::from_value(json!({
        "id": "500",
        "application_id": "600",
        "type": 3,
        "token": "interaction-token",
        "guild_id": "700",
        "channel_id": "chan",
        "member": {
            "user": { "id": "42", "username": "alice", "discriminator": "0" },
            "roles": [],
        },
        "message": { "id": "900", "channel_id": "chan", "content": "menu" },
        "data": { "custom_id": custom_id, "component_type": component_type },
    }))
    .expect("valid interaction JSON")
}

/// A select-menu interaction carrying the picked values.
pub fn select_interaction(custom_id: &str, values: &[&str]) -> Interaction {
    let mut interaction = component_interaction(custom_id, 3);
    if let Some(data) = interaction.data.as_mut() {
        data.values = values.iter().map(|v| v.to_string()).collect();
    }
    interaction
}
