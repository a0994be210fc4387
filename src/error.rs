//! Error types shared across the crate.
//!
//! Every error is raised synchronously at the call that breaks the contract;
//! nothing here is retried.

use std::fmt;

/// Boxed error returned by user-registered interaction handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while building, serialising, or sending component messages.
#[derive(Debug)]
pub enum ComponentError {
    /// Invalid component configuration detected before serialisation
    /// (link button with a `custom_id`, more than 25 select options, ...).
    Config(String),
    /// A row or column limit was exceeded.
    Capacity(String),
    /// A wire dictionary carried a `type` tag we can't decode.
    UnknownComponentType(u64),
    /// The operation needs state that isn't there yet (editing before
    /// sending, responding twice to one interaction).
    State(String),
    /// The wire dictionary was malformed.
    Decode(String),
    /// The host rejected or failed a network call.
    Http(HttpError),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::Config(msg) => write!(f, "invalid component configuration: {msg}"),
            ComponentError::Capacity(msg) => write!(f, "capacity exceeded: {msg}"),
            ComponentError::UnknownComponentType(tag) => {
                write!(f, "unknown component type: {tag}")
            }
            ComponentError::State(msg) => write!(f, "invalid state: {msg}"),
            ComponentError::Decode(msg) => write!(f, "malformed component payload: {msg}"),
            ComponentError::Http(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ComponentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComponentError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ComponentError {
    fn from(e: HttpError) -> Self {
        ComponentError::Http(e)
    }
}

impl From<serde_json::Error> for ComponentError {
    fn from(e: serde_json::Error) -> Self {
        ComponentError::Decode(e.to_string())
    }
}

/// Errors from the host's REST transport.
#[derive(Debug)]
pub enum HttpError {
    /// Non-success status from Discord.
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Transport / network error.
    Transport(String),
    /// Serialisation error.
    Serde(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Api {
                status,
                body,
                route,
            } => {
                write!(f, "Discord API error {} on {}: {}", status, route, body)
            }
            HttpError::Transport(e) => write!(f, "HTTP transport error: {}", e),
            HttpError::Serde(e) => write!(f, "Serialisation error: {}", e),
        }
    }
}

impl std::error::Error for HttpError {}
