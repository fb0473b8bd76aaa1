//! Cisco IOS / IOS-XE platform definition.
//!
//! Privilege levels:
//! - `exec` - user EXEC mode with `>` prompt
//! - `privilege_exec` - privileged EXEC mode with `#` prompt
//! - `configuration` - global config mode with `(config*)#` prompt
//!
//! Prompt patterns are adapted from
//! [scrapli](https://github.com/carlmontanari/scrapli)'s IOS-XE driver.
//!
//! ```text
//! sw-access-01>                 # exec
//! sw-access-01#                 # privilege_exec
//! sw-access-01(config)#         # configuration
//! sw-access-01(config-if)#      # configuration sub-mode
//! ```

use crate::platform::{PlatformDefinition, PrivilegeLevel};

/// Create the Cisco IOS platform definition.
pub fn platform() -> PlatformDefinition {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-@/: ]{1,63}>\s?$").unwrap();

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/: ]{1,63}#\s?$")
        .unwrap()
        .with_parent("exec")
        .with_escalate("enable")
        .with_deescalate("disable")
        .with_auth_prompt(r"(?mi)^[Pp]assword:\s?$")
        .unwrap()
        .with_not_contains("(config");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-@/: ]{1,63}\(config[\w.\-@/:+]{0,32}\)#\s?$",
    )
    .unwrap()
    .with_parent("privilege_exec")
    .with_escalate("configure terminal")
    .with_deescalate("end");

    PlatformDefinition::new("cisco_ios")
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Invalid input detected")
        .with_failure_pattern("% Unknown command")
        .with_failure_pattern("% Bad mask")
        .with_failure_pattern("% Access denied")
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cisco_platform_shape() {
        let platform = platform();
        assert_eq!(platform.name, "cisco_ios");
        assert_eq!(platform.privilege_levels.len(), 3);
        assert!(platform.level("exec").is_some());
        assert!(platform.level("privilege_exec").is_some());
        assert!(platform.level("configuration").is_some());
    }

    #[test]
    fn test_exec_prompt_match() {
        let platform = platform();
        let exec = platform.level("exec").unwrap();

        assert!(exec.matches("sw-access-01>"));
        assert!(exec.matches("sw-access-01> "));
        assert!(!exec.matches("sw-access-01#"));
        assert!(!exec.matches("sw-access-01(config)#"));
    }

    #[test]
    fn test_privilege_exec_prompt_match() {
        let platform = platform();
        let priv_exec = platform.level("privilege_exec").unwrap();

        assert!(priv_exec.matches("sw-access-01#"));
        assert!(priv_exec.matches("sw-access-01# "));

        // "#" also terminates config prompts; not_contains filters those.
        assert!(!priv_exec.matches("sw-access-01(config)#"));
        assert!(!priv_exec.matches("sw-access-01(config-if)#"));
        assert!(!priv_exec.matches("sw-access-01>"));
    }

    #[test]
    fn test_configuration_prompt_match() {
        let platform = platform();
        let config = platform.level("configuration").unwrap();

        assert!(config.matches("sw-access-01(config)#"));
        assert!(config.matches("sw-access-01(config-if)#"));
        assert!(config.matches("sw-access-01(config-vlan)#"));
        assert!(config.matches("sw-access-01(config-line)#"));
        assert!(!config.matches("sw-access-01#"));
    }

    #[test]
    fn test_level_for_prompt() {
        let platform = platform();

        assert_eq!(platform.level_for_prompt("sw1>").unwrap().name, "exec");
        assert_eq!(
            platform.level_for_prompt("sw1#").unwrap().name,
            "privilege_exec"
        );
        assert_eq!(
            platform.level_for_prompt("sw1(config)#").unwrap().name,
            "configuration"
        );
        assert!(platform.level_for_prompt("login:").is_none());
    }

    #[test]
    fn test_combined_pattern_matches_any_level() {
        let platform = platform();
        let pattern = platform.combined_prompt_pattern();

        assert!(pattern.is_match(b"sw-access-01>"));
        assert!(pattern.is_match(b"sw-access-01#"));
        assert!(pattern.is_match(b"sw-access-01(config)#"));
        assert!(pattern.is_match(b"output line\nsw-access-01#"));
    }

    #[test]
    fn test_failure_detection() {
        let platform = platform();

        let output = "interfce range Gi1/0/1\n\
                      ^\n\
                      % Invalid input detected at '^' marker.";
        assert_eq!(
            platform.detect_failure(output),
            Some("% Invalid input detected")
        );
        assert!(platform.detect_failure("Building configuration...").is_none());
    }

    #[test]
    fn test_escalation_chain() {
        let platform = platform();

        let priv_exec = platform.level("privilege_exec").unwrap();
        assert_eq!(priv_exec.previous.as_deref(), Some("exec"));
        assert_eq!(priv_exec.escalate_command.as_deref(), Some("enable"));
        assert!(priv_exec.escalate_auth_prompt.is_some());

        let config = platform.level("configuration").unwrap();
        assert_eq!(config.previous.as_deref(), Some("privilege_exec"));
        assert_eq!(
            config.escalate_command.as_deref(),
            Some("configure terminal")
        );
        assert_eq!(config.deescalate_command.as_deref(), Some("end"));
    }
}
