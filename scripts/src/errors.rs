//! Definitions of errors that can occur during the execution of the deploy script

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy script
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading a compilation artifact from disk
    ReadArtifact(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// No artifact exists for the requested contract
    ArtifactNotFound(String),
    /// More than one artifact matches the requested contract name
    AmbiguousArtifact(String),
    /// The artifact has no deployable bytecode
    UndeployableArtifact(String),
    /// The constructor arguments do not match the contract's constructor
    ConstructorArguments(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error compiling the contracts
    ContractCompilation(String),
    /// Error reading the deployments file
    ReadDeployments(String),
    /// Error writing the deployments file
    WriteDeployments(String),
    /// Error reporting a deployed address
    WriteOutput(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ArtifactNotFound(s) => write!(f, "could not find artifact: {}", s),
            ScriptError::AmbiguousArtifact(s) => write!(f, "ambiguous artifact: {}", s),
            ScriptError::UndeployableArtifact(s) => {
                write!(f, "artifact cannot be deployed: {}", s)
            }
            ScriptError::ConstructorArguments(s) => {
                write!(f, "invalid constructor arguments: {}", s)
            }
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractCompilation(s) => write!(f, "error compiling contracts: {}", s),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::WriteOutput(s) => write!(f, "error writing output: {}", s),
        }
    }
}

impl Error for ScriptError {}
