//! Platform and privilege level definitions.

use indexmap::IndexMap;
use regex::bytes::Regex;

/// One privilege level of a device CLI.
///
/// Levels form a chain: each level names its parent and the commands
/// that move between them.
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    /// Level name (e.g. "exec", "privilege_exec", "configuration").
    pub name: String,

    /// Regex matching this level's prompt at the end of output.
    pub pattern: Regex,

    /// Parent level name (None for the root level).
    pub previous: Option<String>,

    /// Command to escalate TO this level from the parent.
    pub escalate_command: Option<String>,

    /// Command to drop FROM this level back to the parent.
    pub deescalate_command: Option<String>,

    /// Pattern for the password prompt escalation may produce.
    pub escalate_auth_prompt: Option<Regex>,

    /// Substrings that must NOT appear in the prompt for this level to
    /// match. Disambiguates "#" between privileged exec and config mode.
    pub not_contains: Vec<String>,
}

impl PrivilegeLevel {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            previous: None,
            escalate_command: None,
            deescalate_command: None,
            escalate_auth_prompt: None,
            not_contains: vec![],
        })
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.previous = Some(parent.into());
        self
    }

    pub fn with_escalate(mut self, command: impl Into<String>) -> Self {
        self.escalate_command = Some(command.into());
        self
    }

    pub fn with_deescalate(mut self, command: impl Into<String>) -> Self {
        self.deescalate_command = Some(command.into());
        self
    }

    pub fn with_auth_prompt(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.escalate_auth_prompt = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_not_contains(mut self, fragment: impl Into<String>) -> Self {
        self.not_contains.push(fragment.into());
        self
    }

    /// Check whether a prompt string belongs to this level.
    pub fn matches(&self, prompt: &str) -> bool {
        if self.not_contains.iter().any(|nc| prompt.contains(nc)) {
            return false;
        }
        self.pattern.is_match(prompt.as_bytes())
    }
}

/// Everything the driver needs to know about a device family.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g. "cisco_ios").
    pub name: String,

    /// Privilege levels, in escalation order.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Output substrings that mark a command as rejected.
    pub failed_when_contains: Vec<String>,

    /// Commands run right after the session is opened.
    pub on_open_commands: Vec<String>,
}

impl PlatformDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            failed_when_contains: vec![],
            on_open_commands: vec![],
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    /// Get a privilege level by name.
    pub fn level(&self, name: &str) -> Option<&PrivilegeLevel> {
        self.privilege_levels.get(name)
    }

    /// Determine which privilege level a prompt belongs to.
    pub fn level_for_prompt(&self, prompt: &str) -> Option<&PrivilegeLevel> {
        self.privilege_levels.values().find(|l| l.matches(prompt))
    }

    /// Build one regex matching any level's prompt.
    pub fn combined_prompt_pattern(&self) -> Regex {
        let combined = self
            .privilege_levels
            .values()
            .map(|level| format!("(?:{})", level.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&combined).unwrap_or_else(|_| Regex::new(r"[$#>]\s*$").unwrap())
    }

    /// First failure substring found in the output, if any.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .map(String::as_str)
            .find(|pattern| output.contains(pattern))
    }
}
