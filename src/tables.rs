//! Structured parsing of `show interfaces status` output.
//!
//! The table is scraped with a TextFSM template, the same approach
//! netmiko and ntc-templates take for IOS CLI tables.

use std::collections::HashMap;

use textfsm_rust::Template;

use crate::error::{Result, TableError};

const INTERFACES_STATUS_TEMPLATE: &str =
    include_str!("../templates/cisco_ios_show_interfaces_status.textfsm");

/// The exec command whose output this module parses.
pub const SHOW_INTERFACES_STATUS: &str = "show interfaces status";

/// One row of the `show interfaces status` table.
#[derive(Debug, Clone)]
pub struct InterfaceStatus {
    /// Short interface name, e.g. `Gi1/0/7`.
    pub port: String,

    /// Interface description (often empty).
    pub name: String,

    /// Link status: `connected`, `notconnect`, `disabled`, ...
    pub status: String,

    /// Access VLAN id, or the literal `trunk` / `routed`.
    pub vlan: String,

    pub duplex: String,
    pub speed: String,

    /// Media type, e.g. `10/100/1000BaseTX`.
    pub media: String,
}

impl InterfaceStatus {
    /// Whether the port is operating as a trunk.
    pub fn is_trunk(&self) -> bool {
        self.vlan == "trunk"
    }
}

/// Parse `show interfaces status` output into rows.
pub fn parse_interfaces_status(output: &str) -> Result<Vec<InterfaceStatus>> {
    let template = Template::parse_str(INTERFACES_STATUS_TEMPLATE)
        .map_err(|e| TableError::Template(e.to_string()))?;

    let mut parser = template.parser();
    let records = parser
        .parse_text_to_dicts(output)
        .map_err(|e| TableError::Parse(e.to_string()))?;

    Ok(records.into_iter().map(row_from_record).collect())
}

fn row_from_record(record: HashMap<String, String>) -> InterfaceStatus {
    let field = |key: &str| record.get(key).cloned().unwrap_or_default();

    InterfaceStatus {
        port: field("port"),
        name: field("name").trim().to_string(),
        status: field("status"),
        vlan: field("vlan"),
        duplex: field("duplex"),
        speed: field("speed"),
        media: field("type").trim().to_string(),
    }
}

/// Ports currently operating as trunks.
pub fn trunk_ports(rows: &[InterfaceStatus]) -> Vec<String> {
    rows.iter()
        .filter(|row| row.is_trunk())
        .map(|row| row.port.clone())
        .collect()
}

/// Ports that are neither discovered trunks nor listed access ports.
pub fn unused_ports(
    rows: &[InterfaceStatus],
    trunks: &[String],
    access: &[String],
) -> Vec<String> {
    rows.iter()
        .filter(|row| !trunks.contains(&row.port) && !access.contains(&row.port))
        .map(|row| row.port.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Port      Name               Status       Vlan       Duplex  Speed Type
Gi1/0/1   uplink to core     connected    trunk      a-full  a-1000 10/100/1000BaseTX
Gi1/0/2                      connected    10         a-full  a-1000 10/100/1000BaseTX
Gi1/0/3                      notconnect   10           auto   auto 10/100/1000BaseTX
Gi1/0/4                      notconnect   1            auto   auto 10/100/1000BaseTX
Gi1/0/5   printer vlan       notconnect   20           auto   auto 10/100/1000BaseTX
";

    #[test]
    fn test_parse_rows() {
        let rows = parse_interfaces_status(SAMPLE).unwrap();
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].port, "Gi1/0/1");
        assert_eq!(rows[0].name, "uplink to core");
        assert_eq!(rows[0].status, "connected");
        assert_eq!(rows[0].vlan, "trunk");

        // Empty description column.
        assert_eq!(rows[2].port, "Gi1/0/3");
        assert_eq!(rows[2].name, "");
        assert_eq!(rows[2].status, "notconnect");
        assert_eq!(rows[2].vlan, "10");
    }

    #[test]
    fn test_trunk_ports() {
        let rows = parse_interfaces_status(SAMPLE).unwrap();
        assert_eq!(trunk_ports(&rows), vec!["Gi1/0/1"]);
    }

    #[test]
    fn test_unused_ports() {
        let rows = parse_interfaces_status(SAMPLE).unwrap();
        let trunks = vec!["Gi1/0/1".to_string()];
        let access = vec!["Gi1/0/2".to_string(), "Gi1/0/5".to_string()];

        assert_eq!(
            unused_ports(&rows, &trunks, &access),
            vec!["Gi1/0/3", "Gi1/0/4"]
        );
    }

    #[test]
    fn test_no_rows_in_unrelated_output() {
        let rows = parse_interfaces_status("sw-access-01 uptime is 1 week\n").unwrap();
        assert!(rows.is_empty());
    }
}
