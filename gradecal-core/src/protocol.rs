//! Provider protocol types.
//!
//! Defines the JSON protocol used between gradecal and calendar provider
//! binaries (`gradecal-provider-<name>`) over stdin/stdout: one request line
//! in, one response line out.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::EventPayload;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    CreateEvent,
}

/// Request sent to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by a provider.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Create one event on the provider's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Provider-specific settings (account, calendar id, ...) from the config file.
    #[serde(flatten)]
    pub remote_config: serde_json::Map<String, serde_json::Value>,
    pub event: EventPayload,
}

/// What a provider reports for a created event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEvent {
    /// Provider-assigned event id.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProviderCommand for CreateEvent {
    type Response = CreatedEvent;
    fn command() -> Command {
        Command::CreateEvent
    }
}
