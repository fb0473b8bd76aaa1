//! Platform definitions: prompt patterns, privilege levels, failure
//! strings and session-setup commands for a device family.

mod cisco_ios;
mod definition;

pub use definition::{PlatformDefinition, PrivilegeLevel};

/// Look up the platform definition for an inventory `device_type` string.
///
/// Naming follows netmiko-style device type identifiers.
pub fn for_device_type(device_type: &str) -> Option<PlatformDefinition> {
    match device_type {
        "cisco_ios" | "cisco_ios_xe" | "cisco_xe" => Some(cisco_ios::platform()),
        _ => None,
    }
}
