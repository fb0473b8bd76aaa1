//! # Portsmith
//!
//! Sequential access-switch provisioning over SSH.
//!
//! For each switch in a JSON inventory, portsmith opens an SSH session
//! and pushes a fixed hardening sequence: allow the access VLAN on the
//! discovered upstream trunks, harden the listed access ports, quarantine
//! and shut down everything unused, restrict vty access to the management
//! host and set the default gateway.
//!
//! Devices are processed strictly one at a time. A failure on one device
//! is logged and the run continues with the next; there are no retries
//! and no rollback.
//!
//! ## Layers
//!
//! - [`transport`] - russh connection, authentication, host keys
//! - [`channel`] - PTY output buffering and prompt detection
//! - [`platform`] - prompt patterns and failure strings per device family
//! - [`driver`] - command execution ([`Driver`] is the testing seam)
//! - [`tables`] - TextFSM parsing of `show interfaces status`
//! - [`provision`] - the per-switch workflow itself

pub mod channel;
pub mod driver;
pub mod error;
pub mod inventory;
pub mod platform;
pub mod provision;
pub mod tables;
pub mod transport;

pub use driver::{Driver, Response, SshDriver};
pub use error::Error;
pub use inventory::Switch;
pub use provision::Provisioner;
pub use transport::{HostKeyVerification, SshConfig};
