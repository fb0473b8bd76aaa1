//! SSH transport layer wrapping russh.
//!
//! Handles connection setup, password authentication, host key
//! verification and PTY channel creation. Everything above this layer
//! speaks in terms of prompts and commands, not SSH.

pub mod config;
mod ssh;

pub use config::{HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
