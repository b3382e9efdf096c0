//! Constants used in the deploy script

/// The name of the market contract, deployed first
pub const FRAK_MARKET_CONTRACT: &str = "FrakMarket";

/// The name of the fractionalized-sat contract, whose constructor
/// takes the market contract's address
pub const FRAKED_SAT_CONTRACT: &str = "FrakedSat";

/// The market contract key in the deployments file
pub const FRAK_MARKET_CONTRACT_KEY: &str = "FrakMarket";

/// The fraked sat contract key in the deployments file
pub const FRAKED_SAT_CONTRACT_KEY: &str = "FrakedSat";

/// The default RPC URL, a local Hardhat / Anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default private key, the first default account in a Hardhat / Anvil node
pub const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The default directory holding the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The extension of an artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The directory in which Hardhat stores build info, which holds no artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The separator in a fully qualified contract name, i.e. `contracts/Foo.sol:Foo`
pub const FULLY_QUALIFIED_NAME_SEPARATOR: char = ':';

/// The command used to invoke the Hardhat CLI
pub const NPX_COMMAND: &str = "npx";

/// The name of the Hardhat CLI
pub const HARDHAT_COMMAND: &str = "hardhat";

/// The name of the Hardhat compile task
pub const COMPILE_TASK: &str = "compile";
