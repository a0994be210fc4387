//! Interactive message components for Discord bots.
//!
//! Build buttons, select menus, and text inputs, lay them out in action
//! rows, send them as a [`ComponentMessage`], and get called back when users
//! click them. Network calls go through the [`Host`] trait; with the `io`
//! feature (default) [`DiscordHttpClient`] talks to the Discord REST API.
//!
//! ```ignore
//! discord_components::logging::init();
//! let client = Client::from_config(&ClientConfig::from_env()?)?;
//!
//! let mut poll = ComponentMessage::new().content("Ship it?");
//! poll.add_component(Button::new("yes").label("Yes").style(ButtonStyle::Success), None)?;
//! poll.on_interaction("yes", |ctx| async move {
//!     ctx.reply("shipping").await?;
//!     Ok(())
//! });
//! poll.send(&client, SendTarget::Channel(channel_id), SendOptions::default()).await?;
//!
//! // Feed gateway events from your connection:
//! client.dispatch_payload(payload).await;
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod events;
pub mod host;
pub mod message;
pub mod router;
pub mod types;
pub mod view;

#[cfg(feature = "io")]
pub mod config;
#[cfg(feature = "io")]
pub mod http;
#[cfg(feature = "io")]
pub mod logging;

#[cfg(test)]
mod test_support;

pub use client::{Client, Listener, Subscription};
pub use context::ComponentContext;
pub use error::{ComponentError, HandlerError, HttpError};
pub use events::GatewayEvent;
pub use host::{Host, InteractionHandle};
pub use message::{ComponentMessage, ListenerHandle, SendOptions, SendTarget, MAX_ROWS};
pub use router::{component_from_data, ComponentRouter};
pub use types::*;
pub use view::{callback, Callback, View, DEFAULT_VIEW_TIMEOUT};

#[cfg(feature = "io")]
pub use config::ClientConfig;
#[cfg(feature = "io")]
pub use http::DiscordHttpClient;
