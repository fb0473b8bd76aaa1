//! Error types for portsmith.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for portsmith operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Inventory file errors
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Structured-table parsing errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Provisioning workflow errors
    #[error("Provisioning error: {0}")]
    Provision(#[from] ProvisionError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Operation timed out
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),

    /// Host key is not in known_hosts and strict checking is enabled
    #[error("Unknown host key for {host}:{port} (strict host key checking)")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the recorded known_hosts entry
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged {
        host: String,
        port: u16,
        line: usize,
    },

    /// known_hosts file could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),
}

/// Channel layer errors (prompt detection on the PTY).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Prompt pattern was not seen in the output within the timeout
    #[error("Prompt not found within {0:?}")]
    PromptTimeout(Duration),

    /// Channel closed while waiting for output
    #[error("Channel closed by peer")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Driver layer errors (command execution, privilege escalation).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// Device reported a command error (matched a platform failure pattern)
    #[error("Command '{command}' rejected by device: {message}")]
    CommandRejected { command: String, message: String },

    /// Could not reach privileged exec mode
    #[error("Failed to enter privileged exec mode (prompt was '{prompt}')")]
    EnableFailed { prompt: String },

    /// Prompt did not match any known privilege level
    #[error("Unrecognized prompt: '{prompt}'")]
    UnknownPrompt { prompt: String },
}

/// Inventory file errors.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Inventory file could not be read
    #[error("Failed to read inventory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inventory file is not valid JSON
    #[error("Failed to parse inventory {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Inventory contains no switches
    #[error("Inventory {} contains no switches", path.display())]
    Empty { path: PathBuf },

    /// A switch record failed validation
    #[error("Switch '{switch}': {reason}")]
    Invalid { switch: String, reason: String },

    /// device_type has no matching platform definition
    #[error("Switch '{switch}': unsupported device_type '{device_type}'")]
    UnsupportedDeviceType {
        switch: String,
        device_type: String,
    },
}

/// Structured-table parsing errors.
#[derive(Error, Debug)]
pub enum TableError {
    /// The embedded TextFSM template failed to compile
    #[error("TextFSM template error: {0}")]
    Template(String),

    /// The command output did not parse against the template
    #[error("Failed to parse table output: {0}")]
    Parse(String),
}

/// Provisioning workflow errors.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Trunk discovery found no trunk ports on the device
    #[error("No trunk ports configured on '{switch}'")]
    NoTrunkPorts { switch: String },
}

/// Result type alias using portsmith's Error.
pub type Result<T> = std::result::Result<T, Error>;

impl InventoryError {
    /// Shorthand for a validation failure on a named switch.
    pub fn invalid(switch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            switch: switch.into(),
            reason: reason.into(),
        }
    }
}
