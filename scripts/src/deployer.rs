//! Broadcasting of contract-creation transactions

use alloy::{
    dyn_abi::DynSolValue,
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use tracing::{debug, info};

use crate::{artifacts::ContractFactory, errors::ScriptError};

/// Deploys contracts from their factories, returning the deployed address
/// once the creation transaction is confirmed
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploy the contract with the given constructor arguments
    async fn deploy(
        &self,
        factory: &ContractFactory,
        args: Vec<DynSolValue>,
    ) -> Result<Address, ScriptError>;
}

/// A [`ContractDeployer`] sending transactions through an RPC provider
/// with a local signer attached
pub struct RpcDeployer {
    /// The wallet-backed provider
    client: DynProvider<Ethereum>,
    /// The number of confirmations to wait for on each deployment
    confirmations: u64,
}

impl RpcDeployer {
    /// Create a deployer over the given client
    pub fn new(client: DynProvider<Ethereum>, confirmations: u64) -> Self {
        Self {
            client,
            confirmations,
        }
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &self,
        factory: &ContractFactory,
        args: Vec<DynSolValue>,
    ) -> Result<Address, ScriptError> {
        let deploy_code = factory.deploy_code(&args)?;
        let tx = TransactionRequest::default().with_deploy_code(deploy_code);

        let pending_tx = self
            .client
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", factory.name(), e)))?;

        let tx_hash = *pending_tx.tx_hash();
        info!("Sent `{}` deployment in tx {:#x}", factory.name(), tx_hash);

        // `get_receipt` returns as soon as the tx is mined, so wait on the
        // heartbeat for the full confirmation depth before fetching the receipt
        pending_tx
            .with_required_confirmations(self.confirmations)
            .watch()
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", factory.name(), e)))?;

        let receipt = self
            .client
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ScriptError::ContractDeployment(format!("{}: {}", factory.name(), e)))?
            .ok_or_else(|| {
                ScriptError::ContractDeployment(format!(
                    "{}: no receipt found for tx {:#x}",
                    factory.name(),
                    tx_hash
                ))
            })?;

        let address = deployed_address(
            factory.name(),
            tx_hash,
            receipt.status(),
            receipt.contract_address(),
        )?;
        debug!(
            "`{}` confirmed in block {:?}",
            factory.name(),
            receipt.block_number()
        );

        Ok(address)
    }
}

/// Extracts the deployed address from the outcome of a creation transaction,
/// rejecting reverted constructors
fn deployed_address(
    contract_name: &str,
    tx_hash: TxHash,
    succeeded: bool,
    contract_address: Option<Address>,
) -> Result<Address, ScriptError> {
    if !succeeded {
        return Err(ScriptError::ContractDeployment(format!(
            "{contract_name}: constructor reverted in tx {tx_hash:#x}"
        )));
    }

    contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "{contract_name}: receipt for tx {tx_hash:#x} has no contract address"
        ))
    })
}
