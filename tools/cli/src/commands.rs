use anyhow::Result;
use log::{error, info, warn};
use smartwill_cli::deployments::{self, DeploymentRecord};
use smartwill_cli::schedule::WillTerms;
use smartwill_cli::utils::{
    format_amount, format_duration, format_table, parse_amount, parse_duration,
    truncate_address, validate_address, validate_contract_id,
};
use smartwill_cli::{Config, SMART_WILL_TYPE};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::get_source_account;

const DEFAULT_WASM: &str = "../../target/wasm32v1-none/release/smart_will.wasm";

fn stellar_version() -> Option<String> {
    match Command::new("stellar").arg("--version").output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        _ => None,
    }
}

pub async fn deploy_command(
    network: String,
    admin: String,
    token: Option<String>,
    wasm: Option<PathBuf>,
    deployments_path: &Path,
    config: &Config,
) -> Result<()> {
    info!("Deploying Smart Will contract to network: {}", network);

    validate_address(&admin)?;
    let token = token
        .or_else(|| config.contract.token.clone())
        .ok_or_else(|| anyhow::anyhow!("No token contract provided. Pass --token or set contract.token in the config file"))?;
    validate_contract_id(&token)?;

    let wasm_path = wasm.unwrap_or_else(|| PathBuf::from(DEFAULT_WASM));
    if !wasm_path.exists() {
        error!("WASM file not found: {:?}", wasm_path);
        return Err(anyhow::anyhow!(
            "WASM file not found. Please build the contract first."
        ));
    }
    let wasm_arg = wasm_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("WASM path is not valid UTF-8: {:?}", wasm_path))?;

    if stellar_version().is_none() {
        error!("Stellar CLI not found. Please install it first:");
        error!("cargo install --locked stellar-cli");
        return Err(anyhow::anyhow!("Stellar CLI not found"));
    }
    let source = get_source_account(config)?;

    println!("Deploying contract with the following parameters:");
    println!("  Network: {}", network);
    println!("  Admin: {}", admin);
    println!("  Token: {}", token);
    println!("  WASM file: {:?}", wasm_path);
    println!();

    let output = Command::new("stellar")
        .args([
            "contract", "deploy",
            "--wasm", wasm_arg,
            "--source", &source,
            "--network", &network,
        ])
        .output()?;

    if !output.status.success() {
        error!("Contract deployment failed:");
        error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        return Err(anyhow::anyhow!("Contract deployment failed"));
    }

    let contract_id = String::from_utf8(output.stdout)?.trim().to_string();
    info!("Contract deployed: {}", contract_id);
    println!("✅ Contract deployed successfully!");
    println!("Contract ID: {}", contract_id);

    let init_output = Command::new("stellar")
        .args([
            "contract", "invoke",
            "--id", &contract_id,
            "--source", &source,
            "--network", &network,
            "--", "initialize",
            "--admin", &admin,
            "--token", &token,
        ])
        .output()?;

    if !init_output.status.success() {
        error!(
            "Contract initialization failed: {}",
            String::from_utf8_lossy(&init_output.stderr)
        );
        return Err(anyhow::anyhow!("Contract initialization failed"));
    }
    println!("✅ Contract initialized with admin: {}", admin);

    let record = DeploymentRecord::new(&contract_id, SMART_WILL_TYPE, &network);
    let count = deployments::append(deployments_path, record).await?;
    info!("Recorded deployment #{} in {}", count, deployments_path.display());

    Ok(())
}

pub async fn record_command(
    contract_id: String,
    contract_type: String,
    network: String,
    deployments_path: &Path,
) -> Result<()> {
    validate_contract_id(&contract_id)?;

    let record = DeploymentRecord::new(&contract_id, &contract_type, &network);
    let count = deployments::append(deployments_path, record).await?;
    info!("Recorded {} on {} ({} total)", contract_id, network, count);

    println!("✅ Recorded {} deployment on {}", contract_type, network);
    Ok(())
}

pub async fn last_command(
    contract_type: Option<String>,
    network: Option<String>,
    deployments_path: &Path,
) -> Result<()> {
    let records = deployments::load(deployments_path).await?;
    let record = deployments::last_matching(
        &records,
        contract_type.as_deref(),
        network.as_deref(),
    )
    .ok_or_else(|| anyhow::anyhow!("No deployments recorded"))?;

    // Bare ID so scripts can capture it
    println!("{}", record.contract_id);
    Ok(())
}

pub async fn list_command(network: Option<String>, deployments_path: &Path) -> Result<()> {
    let records = deployments::load(deployments_path).await?;
    let rows: Vec<Vec<String>> = records
        .iter()
        .filter(|r| network.as_deref().map_or(true, |n| r.network == n))
        .map(|r| {
            vec![
                truncate_address(&r.contract_id, 6),
                r.contract_type.clone(),
                r.network.clone(),
                r.deployed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ]
        })
        .collect();

    if rows.is_empty() {
        println!("No deployments recorded");
        return Ok(());
    }

    println!(
        "{}",
        format_table(&["Contract", "Type", "Network", "Deployed at"], &rows)
    );
    Ok(())
}

pub async fn info_command(
    contract_id: Option<String>,
    deployments_path: &Path,
    config: &Config,
) -> Result<()> {
    let contract_id = match contract_id.or_else(|| config.contract.default_contract_id.clone()) {
        Some(id) => id,
        None => {
            let records = deployments::load(deployments_path).await?;
            deployments::last_matching(&records, Some(SMART_WILL_TYPE), None)
                .map(|r| r.contract_id.clone())
                .ok_or_else(|| anyhow::anyhow!("No contract ID provided"))?
        }
    };

    info!("Getting contract information for: {}", contract_id);

    println!("Contract Information:");
    println!("  Contract ID: {}", contract_id);
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);

    let output = Command::new("stellar")
        .args([
            "contract", "info", "interface",
            "--id", &contract_id,
            "--rpc-url", &config.network.rpc_url,
            "--network-passphrase", &config.network.network_passphrase,
        ])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            println!("\nContract Interface:");
            println!("{}", String::from_utf8_lossy(&output.stdout));
        }
        Ok(output) => {
            warn!("Failed to get contract details:");
            warn!("{}", String::from_utf8_lossy(&output.stderr));
        }
        Err(e) => {
            warn!("Could not run stellar CLI: {}", e);
        }
    }

    Ok(())
}

pub async fn schedule_command(
    deposit: String,
    amount: String,
    frequency: String,
    waiting_period: String,
    limit: Option<String>,
    decimals: u32,
) -> Result<()> {
    let deposit = parse_amount(&deposit, decimals)?;
    let terms = WillTerms {
        deposit,
        transfer_amount: parse_amount(&amount, decimals)?,
        transfer_frequency: parse_duration(&frequency)?,
        waiting_period: parse_duration(&waiting_period)?,
        limit: match limit {
            Some(limit) => parse_amount(&limit, decimals)?,
            None => deposit,
        },
    };
    let installments = terms.installments()?;

    println!(
        "Payout schedule: {} payouts of {} every {}",
        installments.len(),
        format_amount(terms.transfer_amount, decimals),
        format_duration(terms.transfer_frequency)
    );
    println!(
        "First payout unlocks {} after the owner's last ping",
        format_duration(terms.waiting_period)
    );
    println!();

    let rows: Vec<Vec<String>> = installments
        .iter()
        .map(|i| {
            vec![
                i.index.to_string(),
                format_duration(i.due_after),
                format_amount(i.amount, decimals),
                format_amount(i.remaining_balance, decimals),
            ]
        })
        .collect();
    println!(
        "{}",
        format_table(&["#", "Unlocks after", "Amount", "Remaining"], &rows)
    );
    println!();
    println!(
        "Reclaimable by the owner: {}",
        format_amount(terms.surplus(), decimals)
    );

    Ok(())
}

pub async fn status_command(deployments_path: &Path, config: &Config) -> Result<()> {
    println!("Smart Will CLI Status");
    println!("=====================");
    println!();

    println!("Configuration:");
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);
    println!(
        "  Default Contract ID: {}",
        config.contract.default_contract_id.as_deref().unwrap_or("Not set")
    );
    println!(
        "  Token: {}",
        config.contract.token.as_deref().unwrap_or("Not set")
    );
    println!();

    match deployments::load(deployments_path).await {
        Ok(records) => println!(
            "Deployments: {} recorded in {}",
            records.len(),
            deployments_path.display()
        ),
        Err(e) => println!("Deployments: ❌ {}", e),
    }

    print!("Stellar CLI: ");
    match stellar_version() {
        Some(version) => println!("✅ Available ({})", version),
        None => {
            println!("❌ Not found");
            println!("   Install with: cargo install --locked stellar-cli");
        }
    }

    print!("Contract WASM: ");
    if Path::new(DEFAULT_WASM).exists() {
        println!("✅ Built");
    } else {
        println!("❌ Not found");
        println!("   Build with: stellar contract build");
    }

    Ok(())
}
