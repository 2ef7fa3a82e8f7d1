use clap::Parser;
use std::process;

mod commands;
mod config;

use commands::*;
use config::*;
use smartwill_cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    // Load configuration
    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let deployments_path = match expand_tilde(
        cli.deployments.as_deref().unwrap_or(&config.deployments.path),
    ) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Deploy {
            network,
            admin,
            token,
            wasm,
        } => deploy_command(network, admin, token, wasm, &deployments_path, &config).await,
        Commands::Record {
            contract_id,
            contract_type,
            network,
        } => record_command(contract_id, contract_type, network, &deployments_path).await,
        Commands::Last {
            contract_type,
            network,
        } => last_command(contract_type, network, &deployments_path).await,
        Commands::List { network } => list_command(network, &deployments_path).await,
        Commands::Info { contract_id } => {
            info_command(contract_id, &deployments_path, &config).await
        }
        Commands::Schedule {
            deposit,
            amount,
            frequency,
            waiting_period,
            limit,
            decimals,
        } => schedule_command(deposit, amount, frequency, waiting_period, limit, decimals).await,
        Commands::Status => status_command(&deployments_path, &config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
