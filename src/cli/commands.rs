use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pow-ledger")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "mine",
        about = "Mine blocks of opaque data and report time, difficulty and average"
    )]
    Mine {
        #[arg(long, default_value_t = 10, help = "Number of blocks to mine")]
        blocks: usize,
    },
    #[command(
        name = "demo",
        about = "Build a ledger chain with signed transfers and rewards"
    )]
    Demo {
        #[arg(long, default_value_t = 3, help = "Number of blocks to mine")]
        blocks: usize,
        #[arg(long, help = "Write the resulting chain as JSON to this file")]
        out: Option<PathBuf>,
    },
    #[command(name = "validate", about = "Validate a ledger chain stored as JSON")]
    Validate {
        #[arg(help = "Path to the chain JSON file")]
        chain: PathBuf,
    },
    #[command(
        name = "balance",
        about = "Reconstruct the balance of an address from a JSON chain"
    )]
    Balance {
        #[arg(help = "Path to the chain JSON file")]
        chain: PathBuf,
        #[arg(help = "The address (hex public key)")]
        address: String,
    },
}
