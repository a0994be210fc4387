//! Route every component interaction to one handler.
//!
//! Unlike view bindings, the router doesn't need the component to have been
//! sent by this process: it rebuilds a skeleton [`Component`] from the
//! interaction payload. Only buttons and select menus are routed; other
//! component types (modal text inputs, ...) are skipped.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::client::{Client, Subscription};
use crate::context::ComponentContext;
use crate::error::HandlerError;
use crate::host::InteractionHandle;
use crate::types::*;
use crate::view::{callback, Callback};

pub struct ComponentRouter {
    handler: Callback,
}

impl ComponentRouter {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        Self {
            handler: callback(handler),
        }
    }

    /// Subscribe the router to `client`'s interaction stream.
    pub async fn listen(self, client: &Client) -> Subscription {
        let router = Arc::new(self);
        client
            .listen(move |client, handle| {
                let router = router.clone();
                async move { router.route(&client, handle).await.map(|_| ()) }
            })
            .await
    }

    /// Run the handler for one interaction. Returns whether it ran; handler
    /// errors are passed through.
    pub async fn route(
        &self,
        client: &Client,
        handle: InteractionHandle,
    ) -> Result<bool, HandlerError> {
        let interaction = handle.interaction();
        if !interaction.is_component() {
            return Ok(false);
        }
        let Some(component) = interaction.data.as_ref().and_then(component_from_data) else {
            trace!(interaction_id = %interaction.id, "no routable component in interaction");
            return Ok(false);
        };

        debug!(
            interaction_id = %interaction.id,
            custom_id = component.custom_id().unwrap_or_default(),
            kind = ?component.kind(),
            "routing component interaction"
        );
        let ctx = ComponentContext::new(client.clone(), handle.clone(), component);
        (self.handler)(ctx).await?;
        Ok(true)
    }
}

/// Rebuild the component an interaction was triggered from.
///
/// Buttons (type 2) and select menus (type 3) only. The select menu carries
/// the picked `values` but no options, which the payload doesn't include.
pub fn component_from_data(data: &InteractionData) -> Option<Component> {
    let kind = ComponentType::from_tag(u64::from(data.component_type?)).ok()?;
    match kind {
        ComponentType::Button => Some(
            Button {
                style: data.style.and_then(button_style).unwrap_or_default(),
                label: data.label.clone(),
                emoji: data.emoji.clone(),
                url: None,
                custom_id: data.custom_id.clone(),
                disabled: false,
                row: None,
            }
            .into(),
        ),
        ComponentType::SelectMenu => {
            let mut menu = SelectMenu::new(data.custom_id.clone().unwrap_or_default(), Vec::new())
                .min_values(data.min_values.unwrap_or(1))
                .max_values(data.max_values.unwrap_or(1));
            menu.values = data.values.clone();
            Some(menu.into())
        }
        ComponentType::ActionRow | ComponentType::TextInput => None,
    }
}

fn button_style(raw: u8) -> Option<ButtonStyle> {
    match raw {
        1 => Some(ButtonStyle::Primary),
        2 => Some(ButtonStyle::Secondary),
        3 => Some(ButtonStyle::Success),
        4 => Some(ButtonStyle::Danger),
        5 => Some(ButtonStyle::Link),
        _ => None,
    }
}
