//! Response type for command execution results.

use std::time::Duration;

/// Result of one command sent to a device.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was sent.
    pub command: String,

    /// Normalized output: command echo and trailing prompt removed.
    pub output: String,

    /// The raw output as received.
    pub raw: String,

    /// The prompt that terminated the read.
    pub prompt: String,

    /// Time from send to prompt.
    pub elapsed: Duration,

    /// Failure string matched in the output, if the device rejected
    /// the command.
    failure: Option<String>,
}

impl Response {
    pub fn new(
        command: impl Into<String>,
        output: impl Into<String>,
        raw: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
            raw: raw.into(),
            prompt: prompt.into(),
            elapsed,
            failure: None,
        }
    }

    /// Mark this response as failed with the matched failure string.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// The matched failure string, if the device rejected the command.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.output)
    }
}

/// Strip the command echo and the trailing prompt line from raw output.
pub(crate) fn normalize_output(raw: &str, command: &str) -> String {
    let output = raw
        .trim_start_matches(['\r', '\n'])
        .strip_prefix(command)
        .unwrap_or(raw)
        .trim_start_matches(['\r', '\n']);

    match output.rfind('\n') {
        Some(pos) => output[..pos].trim_end().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_echo_and_prompt() {
        let raw = "show interfaces status\r\nPort      Name   Status\r\nGi1/0/1          connected\r\nsw-access-01#";
        let output = normalize_output(raw, "show interfaces status");
        assert_eq!(
            output,
            "Port      Name   Status\r\nGi1/0/1          connected"
        );
    }

    #[test]
    fn test_normalize_prompt_only() {
        // A config command usually echoes nothing but the next prompt.
        let raw = "vlan 888\r\nsw-access-01(config-vlan)#";
        assert_eq!(normalize_output(raw, "vlan 888"), "");
    }

    #[test]
    fn test_failure_marking() {
        let resp = Response::new("bogus", "", "bogus\n#", "#", Duration::ZERO)
            .with_failure("% Invalid input detected");
        assert!(!resp.is_success());
        assert_eq!(resp.failure(), Some("% Invalid input detected"));
    }
}
