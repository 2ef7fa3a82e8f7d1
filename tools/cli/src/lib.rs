use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod deployments;
pub mod schedule;
pub mod utils;

/// Contract type recorded for Smart Will deployments.
pub const SMART_WILL_TYPE: &str = "smart_will";

#[derive(Parser)]
#[command(name = "smartwill-cli")]
#[command(about = "Operator CLI for Smart Will contracts")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.smartwill/config.toml")]
    pub config: PathBuf,

    /// Deployment records file (overrides the config file)
    #[arg(short, long)]
    pub deployments: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy and initialize a new Smart Will contract
    Deploy {
        /// Network to deploy to
        #[arg(long, default_value = "testnet")]
        network: String,

        /// Admin address passed to `initialize`
        #[arg(long)]
        admin: String,

        /// Token contract wills are funded in (defaults to the config file)
        #[arg(long)]
        token: Option<String>,

        /// WASM file path
        #[arg(long)]
        wasm: Option<PathBuf>,
    },

    /// Append an already deployed contract to the deployment records
    Record {
        /// Contract ID
        #[arg(long)]
        contract_id: String,

        /// Contract type label
        #[arg(long = "type", default_value = SMART_WILL_TYPE)]
        contract_type: String,

        /// Network the contract lives on
        #[arg(long, default_value = "testnet")]
        network: String,
    },

    /// Print the most recently deployed contract ID
    Last {
        /// Only consider this contract type
        #[arg(long = "type")]
        contract_type: Option<String>,

        /// Only consider this network
        #[arg(long)]
        network: Option<String>,
    },

    /// List recorded deployments
    List {
        /// Only show this network
        #[arg(long)]
        network: Option<String>,
    },

    /// Get contract information
    Info {
        /// Contract ID to inspect (defaults to config, then the last deployment)
        #[arg(long)]
        contract_id: Option<String>,
    },

    /// Preview the heir payout timeline for a set of will terms
    Schedule {
        /// Initial deposit, in whole tokens (e.g. 500 or 12.5)
        #[arg(long)]
        deposit: String,

        /// Amount per payout, in whole tokens
        #[arg(long)]
        amount: String,

        /// Minimum spacing between payouts (e.g. 300, 5m, 7d)
        #[arg(long)]
        frequency: String,

        /// Owner inactivity before payouts unlock (e.g. 600, 10m, 180d)
        #[arg(long)]
        waiting_period: String,

        /// Lifetime payout cap, in whole tokens (defaults to the deposit)
        #[arg(long)]
        limit: Option<String>,

        /// Token decimals used to scale amounts
        #[arg(long, default_value_t = 0)]
        decimals: u32,
    },

    /// Show CLI status
    Status,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub auth: AuthConfig,
    pub deployments: DeploymentsConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContractConfig {
    pub default_contract_id: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Source account (identity name or secret) handed to the stellar CLI
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeploymentsConfig {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: "https://soroban-testnet.stellar.org:443".to_string(),
                network_passphrase: "Test SDF Network ; September 2015".to_string(),
            },
            contract: ContractConfig {
                default_contract_id: None,
                token: None,
            },
            auth: AuthConfig { source: None },
            deployments: DeploymentsConfig {
                path: PathBuf::from("~/.smartwill/deployments.json"),
            },
        }
    }
}
