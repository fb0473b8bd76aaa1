//! Inventory file loading and validation.
//!
//! The inventory is a JSON array of switch records. Passwords live in
//! `SecretString` so they stay out of debug output and logs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{InventoryError, Result};
use crate::platform;
use crate::provision::QUARANTINE_VLAN;
use crate::transport::{HostKeyVerification, SshConfig};

fn default_ssh_port() -> u16 {
    22
}

/// One switch record from the inventory file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Switch {
    /// Hostname used in log lines and in the management ACL name.
    pub name: String,

    /// Platform identifier, e.g. `cisco_ios`.
    pub device_type: String,

    /// Management address to SSH to.
    pub host: String,

    #[serde(default = "default_ssh_port")]
    pub port: u16,

    pub username: String,
    pub password: SecretString,

    /// Secret for `enable`, when it differs from the login password.
    #[serde(default)]
    pub enable_secret: Option<SecretString>,

    /// VLAN assigned to the listed access ports.
    pub access_vlan: u16,

    /// Ports to configure as hardened access ports.
    pub access_ports: Vec<String>,

    /// Host permitted by the management ACL on the vty lines.
    pub management_host: String,

    /// Default gateway address for the switch.
    pub default_gateway: String,
}

impl Switch {
    /// Build the SSH configuration for this switch.
    pub fn ssh_config(&self, timeout: Duration, host_key: HostKeyVerification) -> SshConfig {
        // Re-wrap rather than clone; SecretString hands out &str only.
        let password = SecretString::from(self.password.expose_secret().to_owned());

        SshConfig::new(&self.host, &self.username, password)
            .with_port(self.port)
            .with_timeout(timeout)
            .with_host_key_verification(host_key)
    }

    /// The enable secret, re-wrapped for the driver.
    pub fn enable_secret(&self) -> Option<SecretString> {
        self.enable_secret
            .as_ref()
            .map(|s| SecretString::from(s.expose_secret().to_owned()))
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| InventoryError::invalid(&self.name, reason);

        if self.name.trim().is_empty() {
            return Err(InventoryError::invalid("<unnamed>", "name must not be empty").into());
        }
        if self.host.trim().is_empty() {
            return Err(invalid("host must not be empty").into());
        }
        if self.username.trim().is_empty() {
            return Err(invalid("username must not be empty").into());
        }
        if !(2..=4094).contains(&self.access_vlan) {
            return Err(invalid("access_vlan must be in 2..=4094").into());
        }
        if self.access_vlan == QUARANTINE_VLAN {
            return Err(invalid("access_vlan collides with the quarantine VLAN").into());
        }
        if self.access_ports.is_empty() {
            return Err(invalid("access_ports must not be empty").into());
        }
        if self.access_ports.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("access_ports must not contain empty entries").into());
        }
        if self.management_host.trim().is_empty() {
            return Err(invalid("management_host must not be empty").into());
        }
        if self.default_gateway.trim().is_empty() {
            return Err(invalid("default_gateway must not be empty").into());
        }

        if platform::for_device_type(&self.device_type).is_none() {
            return Err(InventoryError::UnsupportedDeviceType {
                switch: self.name.clone(),
                device_type: self.device_type.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Load and validate the inventory file.
pub fn load(path: &Path) -> Result<Vec<Switch>> {
    let contents = fs::read_to_string(path).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let switches: Vec<Switch> =
        serde_json::from_str(&contents).map_err(|source| InventoryError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    if switches.is_empty() {
        return Err(InventoryError::Empty {
            path: path.to_path_buf(),
        }
        .into());
    }

    for switch in &switches {
        switch.validate()?;
    }

    Ok(switches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(overrides: &str) -> String {
        format!(
            r#"{{
                "name": "sw-access-01",
                "device_type": "cisco_ios",
                "host": "10.10.0.11",
                "username": "netops",
                "password": "hunter2",
                "access_vlan": 10,
                "access_ports": ["Gi1/0/2", "Gi1/0/3"],
                "management_host": "10.10.0.100",
                "default_gateway": "10.10.0.1"
                {overrides}
            }}"#
        )
    }

    fn parse_one(json: &str) -> std::result::Result<Switch, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_full_record_parses_and_validates() {
        let switch = parse_one(&record("")).unwrap();
        assert_eq!(switch.name, "sw-access-01");
        assert_eq!(switch.port, 22);
        assert!(switch.enable_secret.is_none());
        assert!(switch.validate().is_ok());
    }

    #[test]
    fn test_optional_fields() {
        let switch = parse_one(&record(
            r#", "port": 2222, "enable_secret": "s3cr3t""#,
        ))
        .unwrap();
        assert_eq!(switch.port, 2222);
        assert!(switch.enable_secret.is_some());
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let switch = parse_one(&record("")).unwrap();
        let debug = format!("{switch:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_vlan_range_rejected() {
        let mut switch = parse_one(&record("")).unwrap();
        switch.access_vlan = 1;
        assert!(switch.validate().is_err());

        switch.access_vlan = 4095;
        assert!(switch.validate().is_err());

        switch.access_vlan = QUARANTINE_VLAN;
        assert!(matches!(
            switch.validate(),
            Err(Error::Inventory(InventoryError::Invalid { .. }))
        ));
    }

    #[test]
    fn test_empty_access_ports_rejected() {
        let mut switch = parse_one(&record("")).unwrap();
        switch.access_ports.clear();
        assert!(switch.validate().is_err());
    }

    #[test]
    fn test_unknown_device_type_rejected() {
        let mut switch = parse_one(&record("")).unwrap();
        switch.device_type = "vendor_unknown".to_string();
        assert!(matches!(
            switch.validate(),
            Err(Error::Inventory(InventoryError::UnsupportedDeviceType { .. }))
        ));
    }

    #[test]
    fn test_ssh_config_carries_connection_details() {
        let switch = parse_one(&record(r#", "port": 2022"#)).unwrap();
        let config = switch.ssh_config(Duration::from_secs(10), HostKeyVerification::Disabled);
        assert_eq!(config.host, "10.10.0.11");
        assert_eq!(config.port, 2022);
        assert_eq!(config.username, "netops");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
