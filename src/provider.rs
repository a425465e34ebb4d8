//! Provider subprocess protocol.
//!
//! Calendar writes are delegated to an external binary named
//! `gradecal-provider-{name}` found in PATH, spoken to with JSON over
//! stdin/stdout. Any executable that speaks the protocol can be a provider;
//! providers own their credentials, gradecal only forwards the extra keys of
//! the `[provider]` config section.

use gradecal_core::protocol::{Command, CreateEvent, CreatedEvent, ProviderCommand, Request, Response};
use gradecal_core::{EventPayload, GradeCalError, GradeCalResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ProviderConfig;

/// A client for one provider binary.
pub struct Provider {
    name: String,
    binary_path: PathBuf,
    timeout: Duration,
    params: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    /// Locate `gradecal-provider-{name}` in PATH.
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let binary_name = format!("gradecal-provider-{}", config.name);
        let binary_path = which::which(&binary_name)
            .map_err(|_| GradeCalError::ProviderNotInstalled(binary_name.clone()))?;

        Ok(Provider {
            name: config.name.clone(),
            binary_path,
            timeout: config.timeout()?,
            params: config.params.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create one event. Returns the provider-assigned id.
    pub async fn create_event(&self, event: EventPayload) -> GradeCalResult<CreatedEvent> {
        self.call(CreateEvent {
            remote_config: self.params.clone(),
            event,
        })
        .await
    }

    /// Call a typed provider command, bounded by the configured timeout.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> GradeCalResult<C::Response> {
        timeout(self.timeout, self.call_raw(C::command(), cmd))
            .await
            .map_err(|_| GradeCalError::ProviderTimeout(self.timeout.as_secs()))?
    }

    /// Low-level call that sends a command with params and deserializes the response.
    async fn call_raw<P: Serialize, R: DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> GradeCalResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| GradeCalError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| GradeCalError::Serialization(e.to_string()))?;

        debug!(provider = %self.name, ?command, "calling provider");

        let mut child = TokioCommand::new(&self.binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GradeCalError::Provider(format!(
                    "Failed to spawn {}: {}",
                    self.binary_path.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GradeCalError::Provider("Provider stdin was not captured".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(GradeCalError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the first response line a provider printed.
fn parse_response<R: DeserializeOwned>(stdout: &str) -> GradeCalResult<R> {
    let line = stdout.lines().find(|l| !l.trim().is_empty()).ok_or_else(|| {
        GradeCalError::Provider("Provider returned no response".into())
    })?;

    let response: Response<R> = serde_json::from_str(line)
        .map_err(|e| GradeCalError::Provider(format!("Failed to parse response: {}", e)))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(GradeCalError::Provider(error)),
    }
}
