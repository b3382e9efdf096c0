//! Type definitions used throughout the deploy script

use alloy::primitives::Address;

/// The addresses of the contracts deployed in a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentReport {
    /// The address of the `FrakMarket` contract
    pub market: Address,
    /// The address of the `FrakedSat` contract
    pub sat: Address,
}
