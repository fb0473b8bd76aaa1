//! Command builders for the provisioning steps.
//!
//! Pure functions from inventory data to IOS config lines, kept free of
//! any session state so the generated command text is unit-testable.

/// VLAN that unused ports are parked in before shutdown.
pub const QUARANTINE_VLAN: u16 = 888;

/// Name assigned to the quarantine VLAN.
pub const QUARANTINE_VLAN_NAME: &str = "UNUSED_PORTS";

/// ACL name applied to the vty lines for a switch.
pub fn acl_name(switch: &str) -> String {
    format!("{switch}_SSH_ACCESS")
}

/// `interface range` argument for a set of ports.
fn interface_range(ports: &[String]) -> String {
    format!("interface range {}", ports.join(", "))
}

/// Allow the access VLAN on one upstream trunk port.
pub fn trunk_vlan_add(port: &str, vlan: u16) -> Vec<String> {
    vec![
        format!("interface {port}"),
        format!("switchport trunk allowed vlan add {vlan}"),
    ]
}

/// Put the access ports in access mode with portfast and BPDU guard.
pub fn access_port_hardening(ports: &[String], vlan: u16) -> Vec<String> {
    vec![
        interface_range(ports),
        "switchport mode access".to_string(),
        format!("switchport access vlan {vlan}"),
        "spanning-tree portfast".to_string(),
        "spanning-tree bpduguard enable".to_string(),
    ]
}

/// Shut down switching on VLAN 1.
pub fn vlan1_shutdown() -> Vec<String> {
    vec!["vlan 1".to_string(), "shutdown".to_string()]
}

/// Park the given ports in the quarantine VLAN and shut them down.
pub fn quarantine_unused(ports: &[String]) -> Vec<String> {
    vec![
        format!("vlan {QUARANTINE_VLAN}"),
        format!("name {QUARANTINE_VLAN_NAME}"),
        interface_range(ports),
        "switchport mode access".to_string(),
        format!("switchport access vlan {QUARANTINE_VLAN}"),
        "shutdown".to_string(),
    ]
}

/// Restrict vty SSH access to the management host.
pub fn management_acl(switch: &str, management_host: &str) -> Vec<String> {
    let acl = acl_name(switch);
    vec![
        format!("ip access-list standard {acl}"),
        format!("permit host {management_host}"),
        "line vty 0 4".to_string(),
        format!("access-class {acl} in"),
    ]
}

/// Set the switch default gateway.
pub fn default_gateway(address: &str) -> Vec<String> {
    vec![format!("ip default-gateway {address}")]
}
