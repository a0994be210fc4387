//! Client configuration loaded from the environment.

use crate::error::ComponentError;

/// Discord REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

const DEFAULT_USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/mrchantey/hello-discord, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Settings for the HTTP host.
#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    pub api_base_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Load `.env` if present, then read `DISCORD_TOKEN` (required) and
    /// `DISCORD_API_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, ComponentError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ComponentError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ComponentError::Config("DISCORD_TOKEN environment variable not set".into())
            })?;

        let mut config = Self::new(token);
        if let Some(url) = lookup("DISCORD_API_BASE_URL").filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
