//! Resolution of contract factories from Hardhat compilation artifacts
//!
//! Hardhat writes one artifact per contract to
//! `<artifacts>/<source path>/<ContractName>.json`, alongside a `.dbg.json`
//! file pointing into `build-info/`. A contract may be requested either by
//! its bare name, in which case it must be unique across all sources, or by
//! its fully qualified name, `contracts/Foo.sol:Foo`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, Specifier},
    json_abi::JsonAbi,
    primitives::{hex, Bytes},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, FULLY_QUALIFIED_NAME_SEPARATOR},
    errors::ScriptError,
};

/// A Hardhat compilation artifact for a single contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The source file the contract was compiled from
    pub source_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The hex-encoded creation bytecode.
    ///
    /// Kept as a string since unlinked bytecode contains library
    /// placeholders which are not valid hex.
    pub bytecode: String,
    /// Library references that must be linked before deployment
    #[serde(default)]
    pub link_references: BTreeMap<String, Value>,
}

impl ContractArtifact {
    /// Read and parse the artifact at the given path
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
    }
}

/// Finds the artifact file for the given contract in the artifacts directory
pub fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    if let Some((source_name, name)) = contract_name.rsplit_once(FULLY_QUALIFIED_NAME_SEPARATOR) {
        // The source name must stay inside the artifacts directory
        let is_contained = Path::new(source_name)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !is_contained {
            return Err(ScriptError::ArtifactNotFound(format!(
                "{contract_name}: source name must be a relative path within {}",
                artifacts_dir.display()
            )));
        }

        let path = artifacts_dir
            .join(source_name)
            .join(format!("{name}.{ARTIFACT_EXTENSION}"));

        return if path.is_file() {
            Ok(path)
        } else {
            Err(ScriptError::ArtifactNotFound(format!(
                "{} (expected at {})",
                contract_name,
                path.display()
            )))
        };
    }

    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");
    let mut matches = Vec::new();
    collect_artifacts(artifacts_dir, &file_name, &mut matches)?;
    matches.sort();

    match matches.len() {
        0 => Err(ScriptError::ArtifactNotFound(format!(
            "{} in {}",
            contract_name,
            artifacts_dir.display()
        ))),
        1 => Ok(matches.remove(0)),
        _ => {
            let candidates = matches
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");

            Err(ScriptError::AmbiguousArtifact(format!(
                "{contract_name} matches [{candidates}], use a fully qualified name"
            )))
        }
    }
}

/// Recursively collects all files named `file_name` under `dir`,
/// skipping the build info directory
fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    matches: &mut Vec<PathBuf>,
) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ReadArtifact(e.to_string()))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_artifacts(&path, file_name, matches)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            matches.push(path);
        }
    }

    Ok(())
}

/// A handle capable of producing the creation calldata for a compiled contract
#[derive(Debug, Clone)]
pub struct ContractFactory {
    /// The name of the contract
    name: String,
    /// The contract ABI, used to check constructor arguments
    abi: JsonAbi,
    /// The creation bytecode
    bytecode: Bytes,
}

impl ContractFactory {
    /// Resolves the factory for the given contract from the artifacts directory
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self, ScriptError> {
        let path = find_artifact(artifacts_dir, contract_name)?;
        debug!("Loading `{}` from {}", contract_name, path.display());

        Self::from_artifact(ContractArtifact::from_file(&path)?)
    }

    /// Builds a factory from a parsed artifact, rejecting artifacts
    /// that cannot be deployed as-is
    pub fn from_artifact(artifact: ContractArtifact) -> Result<Self, ScriptError> {
        if !artifact.link_references.is_empty() {
            let sources = artifact
                .link_references
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");

            return Err(ScriptError::UndeployableArtifact(format!(
                "{} has unlinked library references in {}",
                artifact.contract_name, sources
            )));
        }

        let bytecode = hex::decode(&artifact.bytecode).map_err(|e| {
            ScriptError::ArtifactParsing(format!("{} bytecode: {}", artifact.contract_name, e))
        })?;

        if bytecode.is_empty() {
            return Err(ScriptError::UndeployableArtifact(format!(
                "{} ({}) is abstract or an interface",
                artifact.contract_name, artifact.source_name
            )));
        }

        Ok(Self {
            name: artifact.contract_name,
            abi: artifact.abi,
            bytecode: bytecode.into(),
        })
    }

    /// The name of the contract
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation calldata for the contract, i.e. the bytecode followed
    /// by the ABI-encoded constructor arguments.
    ///
    /// The arguments are checked against the constructor in the ABI; a contract
    /// without a constructor takes no arguments.
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let params = self
            .abi
            .constructor()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default();

        if params.len() != args.len() {
            return Err(ScriptError::ConstructorArguments(format!(
                "{} expects {} constructor arguments, got {}",
                self.name,
                params.len(),
                args.len()
            )));
        }

        for (param, arg) in params.iter().zip(args) {
            let ty = param
                .resolve()
                .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", self.name, e)))?;

            if !ty.matches(arg) {
                return Err(ScriptError::ConstructorArguments(format!(
                    "{}: `{}` expects a value of type {}, got {:?}",
                    self.name, param.name, param.ty, arg
                )));
            }
        }

        let mut code = self.bytecode.to_vec();
        code.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());

        Ok(code.into())
    }
}
