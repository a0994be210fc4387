//! reqwest-backed [`Host`] for the Discord REST API.
//!
//! All outbound calls funnel through [`DiscordHttpClient::request`] so auth
//! headers and error mapping live in one place. Each call is a single
//! attempt; rate limiting is left to the caller.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::HttpError;
use crate::host::Host;
use crate::types::*;

/// HTTP client for the Discord REST API.
///
/// Cheap to clone (reqwest keeps its pool behind an `Arc`).
#[derive(Clone)]
pub struct DiscordHttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscordHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut auth = HeaderValue::from_str(&format!("Bot {}", config.token))
            .map_err(|e| HttpError::Transport(format!("invalid token header: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Low-level: the single request method everything funnels through
    // ------------------------------------------------------------------

    /// Send a request to `{base_url}/{path}` and return the raw body.
    ///
    /// `route_key` names the route in logs and errors, e.g.
    /// `POST /channels/{channel_id}/messages`.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        route_key: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>, HttpError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(route = route_key, "discord request");

        let mut req = self.http.request(method, url.as_str());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let body = String::from_utf8_lossy(&bytes).to_string();
        warn!(route = route_key, status = status.as_u16(), "discord request failed");
        Err(HttpError::Api {
            status: status.as_u16(),
            body,
            route: route_key.to_string(),
        })
    }

    /// Like [`request`](Self::request) but deserialises the response body.
    pub async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        route_key: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let bytes = self.request(method, path, route_key, body).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            let raw = String::from_utf8_lossy(&bytes);
            let end = raw
                .char_indices()
                .nth(200)
                .map_or(raw.len(), |(i, _)| i);
            HttpError::Serde(format!("{}: {}", e, &raw[..end]))
        })
    }
}

#[async_trait]
impl Host for DiscordHttpClient {
    async fn create_message(
        &self,
        channel_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        let path = format!("channels/{}/messages", channel_id);
        let route_key = format!("POST /channels/{}/messages", channel_id);
        self.request_json(Method::POST, &path, &route_key, Some(body))
            .await
    }

    async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        let path = format!("channels/{}/messages/{}", channel_id, message_id);
        let route_key = format!("PATCH /channels/{}/messages/{{message_id}}", channel_id);
        self.request_json(Method::PATCH, &path, &route_key, Some(body))
            .await
    }

    async fn create_interaction_response(
        &self,
        interaction_id: &str,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> Result<(), HttpError> {
        let path = format!(
            "interactions/{}/{}/callback",
            interaction_id, interaction_token
        );
        // Discord returns 204 No Content on success, don't parse JSON.
        self.request(Method::POST, &path, "POST /interactions/callback", Some(response))
            .await?;
        Ok(())
    }

    async fn create_followup_message(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        let path = format!("webhooks/{}/{}", application_id, interaction_token);
        self.request_json(Method::POST, &path, "POST /webhooks/interaction", Some(body))
            .await
    }

    async fn edit_original_response(
        &self,
        application_id: &str,
        interaction_token: &str,
        body: &MessagePayload,
    ) -> Result<Message, HttpError> {
        let path = format!(
            "webhooks/{}/{}/messages/@original",
            application_id, interaction_token
        );
        self.request_json(
            Method::PATCH,
            &path,
            "PATCH /webhooks/interaction/messages/@original",
            Some(body),
        )
        .await
    }

    async fn get_original_response(
        &self,
        application_id: &str,
        interaction_token: &str,
    ) -> Result<Message, HttpError> {
        let path = format!(
            "webhooks/{}/{}/messages/@original",
            application_id, interaction_token
        );
        self.request_json::<_, ()>(
            Method::GET,
            &path,
            "GET /webhooks/interaction/messages/@original",
            None,
        )
        .await
    }
}

impl std::fmt::Debug for DiscordHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordHttpClient")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
