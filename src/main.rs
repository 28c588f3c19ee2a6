use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

// Import from our modularized library
use asset_auditor::prelude::*;

#[derive(Parser)]
#[command(name = "asset_auditor")]
#[command(about = "Offline audit of declared media assets", long_about = None)]
struct Cli {
    /// Audit configuration file registering entity lists and checks
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output format for the collected messages
    #[arg(short, long, value_enum, default_value = "simple")]
    format: FormatKind,

    /// Directory that tabular sources and base paths are resolved against
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Image introspection command used to probe assets
    #[arg(long, default_value = "identify")]
    probe_command: String,

    /// Run in batch mode (no progress bars)
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.config.exists() {
        println!(
            "No audit configuration found at {}; nothing to check.",
            cli.config.display()
        );
        return Ok(());
    }

    let config = AuditConfig::load(&cli.config)?;
    if config.lists.is_empty() {
        println!("Audit configuration registers no entity lists.");
        return Ok(());
    }

    println!("Asset Auditor");
    println!("Checking {} entity list(s)\n", config.lists.len());

    let prober = IdentifyProber::with_binary(&cli.probe_command);
    let mut formatter = cli.format.build();

    run_audit(&config, &cli.root, &prober, formatter.as_mut(), !cli.batch)
}
