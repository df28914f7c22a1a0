use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::query::{SortOrder, StakingStatus};

#[derive(Parser)]
#[command(name = "pocket-query")]
#[command(about = "Query Pocket Network accounts, apps and nodes through an RPC gateway", long_about = None)]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "config/config.toml"
    )]
    pub config: PathBuf,
    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,
    #[command(flatten)]
    pub gateway: GatewayArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GatewayArgs {
    #[arg(short = 'u', long, global = true, help = "Gateway base URL, overrides the configuration file")]
    pub gateway_url: Option<String>,
    #[arg(long, global = true, help = "Seconds to wait for the gateway before giving up")]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest block height
    Height,
    /// Show the balance of an account
    Account {
        #[arg(help = "Account address (40 hex characters)")]
        address: String,
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
    },
    /// Show an application's staking state
    App {
        #[arg(help = "Application address (40 hex characters)")]
        address: String,
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
    },
    /// List applications
    Apps {
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
        #[arg(short, long, help = "Page number", default_value_t = 1)]
        page: u32,
        #[arg(long, help = "Results per page", default_value_t = 100)]
        per_page: u32,
        #[arg(short, long, help = "Staking status to filter by", value_enum, default_value_t = StakingStatus::Staked)]
        staking_status: StakingStatus,
    },
    /// Show a node's staking state
    Node {
        #[arg(help = "Node address (40 hex characters)")]
        address: String,
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
    },
    /// Show a block header summary
    Block {
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
    },
    /// Show the transaction history of an address
    History {
        #[arg(help = "Account address (40 hex characters)")]
        address: String,
        #[arg(long, help = "Block height to query, 0 for latest", default_value_t = 0)]
        height: u64,
        #[arg(short, long, help = "Page number", default_value_t = 1)]
        page: u32,
        #[arg(long, help = "Results per page", default_value_t = 100)]
        per_page: u32,
        #[arg(short, long, help = "Order the gateway sorts by", value_enum, default_value_t = SortOrder::Desc)]
        sort: SortOrder,
    },
    /// Show balance, inferred account type, stake details and history of an address
    Inspect {
        #[arg(help = "Account address (40 hex characters)")]
        address: String,
        #[arg(short, long, help = "History page number", default_value_t = 1)]
        page: u32,
        #[arg(long, help = "History results per page", default_value_t = 100)]
        per_page: u32,
    },
    /// Derive the address owned by a public key
    AddressFromKey {
        #[arg(help = "Public key in hex format")]
        public_key: String,
    },
    /// Check whether a string is a valid address
    ValidateAddress {
        #[arg(help = "Address to check")]
        address: String,
    },
    /// Convert a whole POKT amount to uPOKT
    ToUpokt {
        #[arg(help = "Amount of POKT (whole number)")]
        quantity: String,
    },
}

/// Applies command line overrides on top of values loaded from file.
pub trait ApplyArgs {
    fn apply_gateway(&mut self, args: &GatewayArgs);
}
