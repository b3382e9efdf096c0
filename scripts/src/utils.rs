//! Utilities for the deploy script.

use std::{
    fs,
    path::Path,
    process::{Command, Stdio},
    str::FromStr,
};

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    constants::{COMPILE_TASK, HARDHAT_COMMAND, NPX_COMMAND},
    errors::ScriptError,
};

/// Sets up the client with which to deploy contracts, signing
/// with the given private key and sending to the given RPC url.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<DynProvider<Ethereum>, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer_address = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Deploying from {} on chain {}", deployer_address, chain_id);

    Ok(DynProvider::new(provider))
}

/// Reads the deployments file as a JSON object
fn read_deployments_json(file_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", file_path.display(), e)))?;

    match serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", file_path.display(), e)))?
    {
        Value::Object(map) => Ok(map),
        _ => Err(ScriptError::ReadDeployments(format!(
            "{} does not contain a JSON object",
            file_path.display()
        ))),
    }
}

/// Read the address stored under `contract_key` in the deployments file
pub fn read_deployment(file_path: &Path, contract_key: &str) -> Result<Address, ScriptError> {
    let deployments = read_deployments_json(file_path)?;

    let addr_str = deployments
        .get(contract_key)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!("key {contract_key} not found in deployments"))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record a deployed address under `contract_key` in the deployments file,
/// leaving the other entries untouched
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, start from an empty object
    let mut deployments = if file_path.exists() {
        read_deployments_json(file_path)?
    } else {
        Map::new()
    };

    deployments.insert(
        contract_key.to_string(),
        Value::String(format!("{address:#x}")),
    );

    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    fs::write(file_path, contents)
        .map_err(|e| ScriptError::WriteDeployments(format!("{}: {}", file_path.display(), e)))
}

/// Runs the command, mapping a failed exit status to `err_msg`
fn command_success_or(mut cmd: Command, err_msg: &str) -> Result<(), ScriptError> {
    if !cmd
        .status()
        .map_err(|e| ScriptError::ContractCompilation(e.to_string()))?
        .success()
    {
        Err(ScriptError::ContractCompilation(String::from(err_msg)))
    } else {
        Ok(())
    }
}

/// Runs the Hardhat compile task in the given project root,
/// refreshing the artifacts the deploy script reads.
///
/// Assumes that `npx` and the project's Hardhat installation are locally available.
pub fn compile_contracts(project_root: &Path) -> Result<(), ScriptError> {
    let mut compile_cmd = Command::new(NPX_COMMAND);
    compile_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    compile_cmd.current_dir(project_root);
    compile_cmd.arg(HARDHAT_COMMAND);
    compile_cmd.arg(COMPILE_TASK);

    info!("Compiling contracts in {}", project_root.display());
    command_success_or(compile_cmd, "Failed to compile contracts")
}
