use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use portsmith::driver::SshDriver;
use portsmith::error::Result;
use portsmith::inventory::{self, Switch};
use portsmith::platform;
use portsmith::provision::Provisioner;
use portsmith::transport::HostKeyVerification;

/// Sequential access-switch provisioning over SSH.
#[derive(Debug, Parser)]
#[command(name = "portsmith", version, about)]
struct Cli {
    /// Path to the JSON inventory file.
    inventory: PathBuf,

    /// Per-connection and per-command timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Skip host key verification entirely (lab gear with ephemeral keys).
    #[arg(long)]
    insecure: bool,

    /// Require hosts to already be in known_hosts.
    #[arg(long, conflicts_with = "insecure")]
    strict_host_keys: bool,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn host_key_verification(&self) -> HostKeyVerification {
        if self.insecure {
            HostKeyVerification::Disabled
        } else if self.strict_host_keys {
            HostKeyVerification::Strict
        } else {
            HostKeyVerification::AcceptNew
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let switches = match inventory::load(&cli.inventory) {
        Ok(switches) => switches,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    info!("loaded {} switches from inventory", switches.len());

    let mut failed = 0usize;
    let total = switches.len();

    for switch in switches {
        let name = switch.name.clone();
        info!("========== {name} ==========");

        match provision_switch(switch, &cli).await {
            Ok(()) => info!("{name}: finished"),
            Err(e) => {
                error!("{name}: provisioning failed: {e}");
                failed += 1;
            }
        }
    }

    println!("{} of {total} switches provisioned", total - failed);

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn provision_switch(switch: Switch, cli: &Cli) -> Result<()> {
    // Inventory validation already checked the device_type, so the
    // lookup cannot fail here.
    let platform = platform::for_device_type(&switch.device_type)
        .expect("device_type validated at inventory load");

    let ssh_config = switch.ssh_config(
        Duration::from_secs(cli.timeout),
        cli.host_key_verification(),
    );

    let driver = SshDriver::new(ssh_config, platform).with_enable_secret(switch.enable_secret());

    Provisioner::new(driver, switch).run().await
}
