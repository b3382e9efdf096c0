//! Implementation of the deploy script

use std::{io::Write, path::Path};

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use tracing::info;

use crate::{
    artifacts::ContractFactory,
    constants::{
        FRAKED_SAT_CONTRACT, FRAKED_SAT_CONTRACT_KEY, FRAK_MARKET_CONTRACT,
        FRAK_MARKET_CONTRACT_KEY,
    },
    deployer::ContractDeployer,
    errors::ScriptError,
    types::DeploymentReport,
    utils::write_deployed_address,
};

/// Deploys `FrakMarket`, then `FrakedSat` constructed with the market's address.
///
/// Each address is written to `out` as soon as its deployment is confirmed and,
/// if a deployments file is given, recorded there. The first failure aborts the
/// sequence; a market that was already deployed stays deployed.
pub async fn deploy_frak_contracts(
    deployer: &impl ContractDeployer,
    artifacts_dir: &Path,
    deployments_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<DeploymentReport, ScriptError> {
    let market = deploy_contract(deployer, artifacts_dir, FRAK_MARKET_CONTRACT, vec![]).await?;
    report_deployment(out, "frakMarket", market)?;
    if let Some(path) = deployments_path {
        write_deployed_address(path, FRAK_MARKET_CONTRACT_KEY, market)?;
    }

    let sat = deploy_contract(
        deployer,
        artifacts_dir,
        FRAKED_SAT_CONTRACT,
        vec![DynSolValue::Address(market)],
    )
    .await?;
    report_deployment(out, "frakedSat", sat)?;
    if let Some(path) = deployments_path {
        write_deployed_address(path, FRAKED_SAT_CONTRACT_KEY, sat)?;
    }

    Ok(DeploymentReport { market, sat })
}

/// Resolves the factory for `contract_name` and deploys it
async fn deploy_contract(
    deployer: &impl ContractDeployer,
    artifacts_dir: &Path,
    contract_name: &str,
    args: Vec<DynSolValue>,
) -> Result<Address, ScriptError> {
    let factory = ContractFactory::load(artifacts_dir, contract_name)?;

    info!("Deploying `{}`", contract_name);
    deployer.deploy(&factory, args).await
}

/// Writes the deployed address of a contract to the output
fn report_deployment(
    out: &mut impl Write,
    label: &str,
    address: Address,
) -> Result<(), ScriptError> {
    writeln!(out, "{label} deployed to:  {address}")
        .and_then(|_| out.flush())
        .map_err(|e| ScriptError::WriteOutput(e.to_string()))
}
