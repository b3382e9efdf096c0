//! Definitions of CLI arguments for the deploy script

use std::{io, path::PathBuf};

use clap::Parser;
use tracing::warn;

use crate::{
    commands::deploy_frak_contracts,
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_PKEY, DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS},
    deployer::RpcDeployer,
    errors::ScriptError,
    types::DeploymentReport,
    utils::{compile_contracts, setup_client},
};

/// Deploy the `FrakMarket` and `FrakedSat` contracts to an EVM chain
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer, defaults to the first Hardhat devnet account
    #[arg(long = "pkey", env = "PKEY", default_value = DEFAULT_PKEY, hide_default_value = true)]
    pub priv_key: String,

    /// Directory containing the Hardhat compilation artifacts, relative to the
    /// project root unless absolute. Defaults to `<project root>/artifacts`
    #[arg(short, long, env = "ARTIFACTS_DIR")]
    pub artifacts: Option<PathBuf>,

    /// Path to a JSON file in which to record the deployed addresses
    #[arg(short, long, env = "DEPLOYMENTS_PATH")]
    pub deployments: Option<PathBuf>,

    /// Number of confirmations to wait for on each deployment
    #[arg(long, env = "CONFIRMATIONS", default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Run the Hardhat compile task before deploying
    #[arg(long)]
    pub compile: bool,

    /// Root of the Hardhat project, in which contracts are compiled
    /// and artifacts are looked up
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,
}

impl Cli {
    /// The directory from which contract artifacts are read
    pub fn artifacts_dir(&self) -> PathBuf {
        match &self.artifacts {
            Some(artifacts) => self.project_root.join(artifacts),
            None => self.project_root.join(DEFAULT_ARTIFACTS_DIR),
        }
    }

    /// Run the deploy script, printing each deployed address to stdout
    pub async fn run(self) -> Result<DeploymentReport, ScriptError> {
        if self.compile {
            compile_contracts(&self.project_root)?;
        }

        if self.priv_key == DEFAULT_PKEY {
            warn!("Deploying with the default devnet key - THIS SHOULD ONLY BE DONE FOR TESTING");
        }

        let client = setup_client(&self.priv_key, &self.rpc_url).await?;
        let deployer = RpcDeployer::new(client, self.confirmations);

        let artifacts_dir = self.artifacts_dir();
        let mut stdout = io::stdout();
        deploy_frak_contracts(
            &deployer,
            &artifacts_dir,
            self.deployments.as_deref(),
            &mut stdout,
        )
        .await
    }
}
