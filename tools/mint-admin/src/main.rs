//! Mint-Admin: Quantum-Mint operator CLI
//!
//! ```text
//! mint-admin root allowlist.txt
//! mint-admin proof allowlist.txt 0x0101...
//! mint-admin verify --root 0x... --address 0x... 0x<sibling> 0x<sibling>
//! mint-admin config default > mint.toml
//! mint-admin config check mint.toml
//! mint-admin simulate allowlist.txt --quantity 2 --config mint.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mint_admin::{
    build_report, check_proof, default_config_toml, lint_config, load_allowlist, load_config,
    proof_for, simulate_presale,
};
use nft_mint::prelude::{Address, Hash};

/// Mint-Admin: Quantum-Mint operator CLI
#[derive(Parser, Debug)]
#[command(name = "mint-admin")]
#[command(about = "Allowlist and configuration tooling for the mint engine")]
#[command(version)]
struct Args {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the allowlist root and every member's proof as JSON
    Root {
        /// One address per line
        allowlist: PathBuf,
        /// Print only the root
        #[arg(long)]
        root_only: bool,
    },

    /// Print one member's proof as JSON
    Proof {
        /// One address per line
        allowlist: PathBuf,
        /// Member address
        address: Address,
    },

    /// Check a proof against a root
    Verify {
        /// Committed root
        #[arg(long)]
        root: Hash,
        /// Claimed member
        #[arg(long)]
        address: Address,
        /// Sibling hashes, leaf to root
        proof: Vec<String>,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Dry-run a presale where every member mints `quantity` tokens
    Simulate {
        /// One address per line
        allowlist: PathBuf,
        /// Tokens per member
        #[arg(short, long, default_value = "1")]
        quantity: u64,
        /// Engine config (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the default configuration as TOML
    Default,
    /// Parse a config file and report questionable settings
    Check {
        /// TOML file
        path: PathBuf,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command) -> Result<bool> {
    match command {
        Command::Root {
            allowlist,
            root_only,
        } => {
            let report = build_report(&load_allowlist(&allowlist)?)?;
            if root_only {
                println!("{}", report.root.to_hex());
            } else {
                print_json(&report)?;
            }
        }

        Command::Proof { allowlist, address } => {
            let proof = proof_for(&load_allowlist(&allowlist)?, &address)?;
            print_json(&proof)?;
        }

        Command::Verify {
            root,
            address,
            proof,
        } => {
            let valid = check_proof(&root, &address, &proof)?;
            println!("{}", if valid { "valid" } else { "invalid" });
            return Ok(valid);
        }

        Command::Config {
            command: ConfigCommand::Default,
        } => {
            print!("{}", default_config_toml()?);
        }

        Command::Config {
            command: ConfigCommand::Check { path },
        } => {
            let config = load_config(Some(&path))?;
            let findings = lint_config(&config);
            for finding in &findings {
                warn!("{}", finding);
            }
            info!(
                name = %config.name,
                price = %config.price_per_unit,
                findings = findings.len(),
                "Config parsed"
            );
            return Ok(findings.is_empty());
        }

        Command::Simulate {
            allowlist,
            quantity,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let addresses = load_allowlist(&allowlist)?;
            let report = simulate_presale(config, &addresses, quantity).await?;
            print_json(&report)?;
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}
