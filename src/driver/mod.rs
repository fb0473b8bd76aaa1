//! High-level driver for device interaction.
//!
//! The driver sends commands, waits for the prompt and classifies the
//! response. The [`Driver`] trait is the seam between the provisioning
//! workflow and the SSH stack: the workflow only ever talks to a
//! `Driver`, so it can be exercised against a scripted fake.

mod response;
mod ssh_driver;

pub use response::Response;
pub use ssh_driver::SshDriver;

use std::future::Future;

use crate::error::Result;

/// Trait for device drivers.
pub trait Driver: Send {
    /// Open the connection and bring the session to privileged exec mode.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send a single exec-mode command and wait for the prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Send a set of commands inside configuration mode.
    ///
    /// Enters config mode, runs the commands in order and returns to
    /// privileged exec. A command the device rejects aborts the set
    /// with [`DriverError::CommandRejected`](crate::error::DriverError).
    fn send_config_set(
        &mut self,
        commands: &[String],
    ) -> impl Future<Output = Result<Vec<Response>>> + Send;

    /// Check if the driver is connected.
    fn is_open(&self) -> bool;
}
