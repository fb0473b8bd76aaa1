//! SSH-backed driver implementation.

use std::time::Instant;

use log::{debug, info};
use regex::bytes::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::Driver;
use super::response::{Response, normalize_output};
use crate::channel::CliChannel;
use crate::error::{DriverError, Result};
use crate::platform::PlatformDefinition;
use crate::transport::{SshConfig, SshTransport};

/// Bytes of output tail searched for prompts.
const PROMPT_SEARCH_DEPTH: usize = 1000;

/// Driver for one switch, speaking the platform's CLI over SSH.
///
/// `open()` connects, waits for the banner prompt, escalates to
/// privileged exec if the session lands in user exec, and runs the
/// platform's session-setup commands (paging off, wide terminal).
pub struct SshDriver {
    config: SshConfig,
    platform: PlatformDefinition,

    /// Secret for `enable`, when the device asks for one. Falls back to
    /// the login password.
    enable_secret: Option<SecretString>,

    transport: Option<SshTransport>,
    channel: Option<CliChannel>,

    /// Matches any privilege level's prompt.
    prompt_pattern: Regex,
}

impl SshDriver {
    pub fn new(config: SshConfig, platform: PlatformDefinition) -> Self {
        let prompt_pattern = platform.combined_prompt_pattern();
        Self {
            config,
            platform,
            enable_secret: None,
            transport: None,
            channel: None,
            prompt_pattern,
        }
    }

    pub fn with_enable_secret(mut self, secret: Option<SecretString>) -> Self {
        self.enable_secret = secret;
        self
    }

    fn channel_mut(&mut self) -> Result<&mut CliChannel> {
        self.channel.as_mut().ok_or(DriverError::NotConnected.into())
    }

    /// Send a line and read until any prompt, returning (raw, prompt).
    async fn exchange(&mut self, line: &str) -> Result<(String, String)> {
        let pattern = self.prompt_pattern.clone();
        let channel = self.channel_mut()?;
        channel.send_line(line).await?;
        let data = channel.read_until(&pattern).await?;
        let raw = String::from_utf8_lossy(&data).to_string();
        let prompt = last_match(&pattern, &data);
        Ok((raw, prompt))
    }

    /// Escalate from user exec to privileged exec via `enable`.
    async fn escalate(&mut self, from_prompt: &str) -> Result<()> {
        let current = self
            .platform
            .level_for_prompt(from_prompt)
            .ok_or_else(|| DriverError::UnknownPrompt {
                prompt: from_prompt.to_string(),
            })?;

        let target = self
            .platform
            .privilege_levels
            .values()
            .find(|l| l.previous.as_deref() == Some(current.name.as_str()))
            .ok_or_else(|| DriverError::EnableFailed {
                prompt: from_prompt.to_string(),
            })?
            .clone();

        let escalate_command =
            target
                .escalate_command
                .as_deref()
                .ok_or_else(|| DriverError::EnableFailed {
                    prompt: from_prompt.to_string(),
                })?;

        debug!("escalating with '{escalate_command}'");

        // The device answers `enable` with either the target prompt or a
        // password prompt, so wait on both.
        let wait_pattern = match &target.escalate_auth_prompt {
            Some(auth) => Regex::new(&format!(
                "(?:{})|(?:{})",
                auth.as_str(),
                target.pattern.as_str()
            ))
            .unwrap_or_else(|_| target.pattern.clone()),
            None => target.pattern.clone(),
        };

        let channel = self.channel_mut()?;
        channel.send_line(escalate_command).await?;
        let data = channel.read_until(&wait_pattern).await?;
        let mut prompt = last_match(&wait_pattern, &data);

        let asked_for_password = target
            .escalate_auth_prompt
            .as_ref()
            .is_some_and(|auth| auth.is_match(prompt.as_bytes()));

        if asked_for_password {
            let secret = self
                .enable_secret
                .as_ref()
                .unwrap_or(&self.config.password)
                .expose_secret()
                .to_owned();

            let channel = self.channel_mut()?;
            channel.send_line(&secret).await?;
            let data = channel.read_until(&target.pattern).await?;
            prompt = last_match(&target.pattern, &data);
        }

        if !target.matches(&prompt) {
            return Err(DriverError::EnableFailed { prompt }.into());
        }

        debug!("reached privilege level '{}'", target.name);
        Ok(())
    }
}

impl Driver for SshDriver {
    async fn open(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(&self.config).await?;
        let channel = CliChannel::new(
            transport.open_channel().await?,
            self.config.timeout,
            PROMPT_SEARCH_DEPTH,
        );
        self.transport = Some(transport);
        self.channel = Some(channel);

        // Banner and MOTD scroll by before the first prompt.
        let pattern = self.prompt_pattern.clone();
        let channel = self.channel_mut()?;
        let data = channel.read_until(&pattern).await?;
        let prompt = last_match(&pattern, &data);

        let level = self
            .platform
            .level_for_prompt(&prompt)
            .ok_or_else(|| DriverError::UnknownPrompt {
                prompt: prompt.clone(),
            })?;

        if level.previous.is_none() {
            // Landed in user exec; configuration needs privileged exec.
            self.escalate(&prompt).await?;
        }

        for command in self.platform.on_open_commands.clone() {
            let response = self.send_command(&command).await?;
            if let Some(message) = response.failure() {
                return Err(DriverError::CommandRejected {
                    command,
                    message: message.to_string(),
                }
                .into());
            }
        }

        info!("{}: session open", self.config.host);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.channel = None;
        if let Some(transport) = self.transport.take() {
            transport.close().await?;
            debug!("{}: session closed", self.config.host);
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let start = Instant::now();
        let (raw, prompt) = self.exchange(command).await?;
        let elapsed = start.elapsed();

        let output = normalize_output(&raw, command);
        let response = Response::new(command, output, raw, prompt, elapsed);

        match self.platform.detect_failure(&response.output) {
            Some(message) => Ok(response.with_failure(message.to_string())),
            None => Ok(response),
        }
    }

    async fn send_config_set(&mut self, commands: &[String]) -> Result<Vec<Response>> {
        let enter = self.send_command("configure terminal").await?;
        if let Some(message) = enter.failure().map(str::to_string) {
            return Err(DriverError::CommandRejected {
                command: enter.command,
                message,
            }
            .into());
        }

        let mut responses = Vec::with_capacity(commands.len());
        for command in commands {
            let response = self.send_command(command).await?;
            if let Some(message) = response.failure() {
                let rejected = DriverError::CommandRejected {
                    command: command.clone(),
                    message: message.to_string(),
                };
                // Best effort return to privileged exec before bailing.
                let _ = self.send_command("end").await;
                return Err(rejected.into());
            }
            responses.push(response);
        }

        self.send_command("end").await?;
        Ok(responses)
    }

    fn is_open(&self) -> bool {
        self.transport.is_some()
    }
}

/// Last occurrence of `pattern` in `data`, trimmed, as a string.
fn last_match(pattern: &Regex, data: &[u8]) -> String {
    pattern
        .find_iter(data)
        .last()
        .map(|m| String::from_utf8_lossy(m.as_bytes()).trim().to_string())
        .unwrap_or_default()
}
