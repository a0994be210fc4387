//! The boundary to the host platform's REST surface.
//!
//! Everything that touches the network goes through [`Host`]. The crate
//! ships a reqwest-backed implementation ([`DiscordHttpClient`]) behind the
//! `io` feature; tests plug in a recording double.
//!
//! [`DiscordHttpClient`]: crate::http::DiscordHttpClient

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HttpError;
use crate::types::*;

/// The host calls this crate delegates to. Each call is single-shot.
#[async_trait]
pub trait Host: Send + Sync {
    /// Plain channel send.
    async fn create_message(
        &self,
        channel_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError>;

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError>;

    /// Initial response to an interaction (send, defer, or update).
    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> Result<(), HttpError>;

    /// Follow-up message after the initial response.
    async fn create_followup_message(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError>;

    async fn edit_original_response(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError>;

    async fn get_original_response(
        &self,
        application_id: &str,
        interaction_token: &str,
    ) -> Result<Message, HttpError>;
}

/// An inbound interaction plus whether it has been responded to yet.
///
/// Clones share the responded flag, so a context, a component message, and
/// the dispatcher all agree on which response path is still open.
#[derive(Debug, Clone)]
pub struct InteractionHandle {
    interaction: Arc<Interaction>,
    responded: Arc<AtomicBool>,
}

impl InteractionHandle {
    pub fn new(interaction: Interaction) -> Self {
        Self {
            interaction: Arc::new(interaction),
            responded: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Whether the initial response has been sent.
    pub fn is_done(&self) -> bool {
        self.responded.load(Ordering::Acquire)
    }

    /// Claim the initial response. Returns `false` if it was already taken.
    pub(crate) fn claim_response(&self) -> bool {
        !self.responded.swap(true, Ordering::AcqRel)
    }

    /// Give the claim back after the host rejected the response.
    pub(crate) fn release_response(&self) {
        self.responded.store(false, Ordering::Release);
    }
}

impl From<Interaction> for InteractionHandle {
    fn from(interaction: Interaction) -> Self {
        InteractionHandle::new(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::component_interaction;

    #[test]
    fn response_can_only_be_claimed_once() {
        let handle = InteractionHandle::new(component_interaction("a", 2));
        let shared = handle.clone();
        assert!(!shared.is_done());
        assert!(handle.claim_response());
        assert!(shared.is_done());
        assert!(!shared.claim_response());
    }

    #[test]
    fn released_claim_reopens_the_response_path() {
        let handle = InteractionHandle::new(component_interaction("a", 2));
        assert!(handle.claim_response());
        handle.release_response();
        assert!(!handle.is_done());
    }
}
