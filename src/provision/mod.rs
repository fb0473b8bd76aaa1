//! The per-device provisioning workflow.
//!
//! One [`Provisioner`] is built per switch. `run()` opens the session,
//! executes the fixed step sequence and closes the session; any step
//! failure aborts the remaining steps for that device. Handling the
//! failure (log and move on to the next switch) is the caller's job.

pub mod commands;

pub use commands::{QUARANTINE_VLAN, QUARANTINE_VLAN_NAME};

use log::{info, warn};

use crate::driver::{Driver, Response};
use crate::error::{DriverError, ProvisionError, Result};
use crate::inventory::Switch;
use crate::tables::{self, SHOW_INTERFACES_STATUS};

/// Sequential provisioning workflow for one switch.
pub struct Provisioner<D: Driver> {
    driver: D,
    switch: Switch,

    /// Trunk ports discovered in the first step.
    trunk_ports: Vec<String>,
}

impl<D: Driver> Provisioner<D> {
    pub fn new(driver: D, switch: Switch) -> Self {
        Self {
            driver,
            switch,
            trunk_ports: Vec::new(),
        }
    }

    /// Open the session, run all provisioning steps, close the session.
    pub async fn run(mut self) -> Result<()> {
        self.driver.open().await?;

        let outcome = self.execute().await;

        if let Err(e) = self.driver.close().await {
            warn!("{}: error closing session: {e}", self.switch.name);
        }

        outcome
    }

    async fn execute(&mut self) -> Result<()> {
        self.update_trunk_vlans().await?;
        self.configure_access_ports().await?;
        self.disable_unused_ports().await?;
        self.apply_management_acl().await?;
        self.set_default_gateway().await?;
        Ok(())
    }

    /// Fetch the interface table and return its parsed rows.
    async fn interface_table(&mut self) -> Result<Vec<tables::InterfaceStatus>> {
        let response = self.driver.send_command(SHOW_INTERFACES_STATUS).await?;
        ensure_accepted(&response)?;
        tables::parse_interfaces_status(&response.output)
    }

    /// Discover upstream trunk ports and allow the access VLAN on each.
    async fn update_trunk_vlans(&mut self) -> Result<()> {
        info!("{}: updating upstream trunk ports", self.switch.name);

        let rows = self.interface_table().await?;
        self.trunk_ports = tables::trunk_ports(&rows);

        if self.trunk_ports.is_empty() {
            return Err(ProvisionError::NoTrunkPorts {
                switch: self.switch.name.clone(),
            }
            .into());
        }

        for port in self.trunk_ports.clone() {
            self.driver
                .send_config_set(&commands::trunk_vlan_add(&port, self.switch.access_vlan))
                .await?;
        }

        Ok(())
    }

    /// Configure the access VLAN, portfast and BPDU guard on access ports.
    async fn configure_access_ports(&mut self) -> Result<()> {
        info!("{}: configuring access ports", self.switch.name);

        self.driver
            .send_config_set(&commands::access_port_hardening(
                &self.switch.access_ports,
                self.switch.access_vlan,
            ))
            .await?;

        Ok(())
    }

    /// Shut down VLAN 1 and park every remaining port in the quarantine
    /// VLAN.
    ///
    /// The table is fetched again here rather than reusing the first
    /// snapshot, so ports that changed state during this run are still
    /// classified against current data.
    async fn disable_unused_ports(&mut self) -> Result<()> {
        info!("{}: shutting down VLAN 1", self.switch.name);
        self.driver
            .send_config_set(&commands::vlan1_shutdown())
            .await?;

        let rows = self.interface_table().await?;
        let unused = tables::unused_ports(&rows, &self.trunk_ports, &self.switch.access_ports);

        if unused.is_empty() {
            warn!("{}: no unused ports to shut down", self.switch.name);
            return Ok(());
        }

        info!(
            "{}: shutting down {} unused ports",
            self.switch.name,
            unused.len()
        );
        self.driver
            .send_config_set(&commands::quarantine_unused(&unused))
            .await?;

        Ok(())
    }

    /// Create the management ACL and apply it to the vty lines.
    async fn apply_management_acl(&mut self) -> Result<()> {
        info!("{}: applying management ACL", self.switch.name);

        self.driver
            .send_config_set(&commands::management_acl(
                &self.switch.name,
                &self.switch.management_host,
            ))
            .await?;

        Ok(())
    }

    /// Set the default gateway.
    async fn set_default_gateway(&mut self) -> Result<()> {
        info!("{}: setting default gateway", self.switch.name);

        self.driver
            .send_config_set(&commands::default_gateway(&self.switch.default_gateway))
            .await?;

        Ok(())
    }
}

/// Turn a failure-marked response into a `CommandRejected` error.
fn ensure_accepted(response: &Response) -> Result<()> {
    match response.failure() {
        Some(message) => Err(DriverError::CommandRejected {
            command: response.command.clone(),
            message: message.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
