//! Tests for the deployment sequence against a recording deployer

use std::{fs, path::Path, sync::Mutex};

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use frak_scripts::{
    artifacts::ContractFactory, commands::deploy_frak_contracts, deployer::ContractDeployer,
    errors::ScriptError, types::DeploymentReport, utils::read_deployment,
};
use serde_json::json;
use tempfile::TempDir;

/// A deployer which records every deployment and hands out sequential addresses
#[derive(Default)]
struct MockDeployer {
    /// The contract name and constructor arguments of each deployment
    calls: Mutex<Vec<(String, Vec<DynSolValue>)>>,
    /// The contract whose deployment fails, if any
    fail_on: Option<&'static str>,
}

impl MockDeployer {
    fn failing_on(contract_name: &'static str) -> Self {
        Self {
            fail_on: Some(contract_name),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(String, Vec<DynSolValue>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContractDeployer for MockDeployer {
    async fn deploy(
        &self,
        factory: &ContractFactory,
        args: Vec<DynSolValue>,
    ) -> Result<Address, ScriptError> {
        factory.deploy_code(&args)?;

        let mut calls = self.calls.lock().unwrap();
        calls.push((factory.name().to_string(), args));

        if self.fail_on == Some(factory.name()) {
            return Err(ScriptError::ContractDeployment(
                "insufficient funds for gas * price + value".to_string(),
            ));
        }

        Ok(Address::repeat_byte(calls.len() as u8))
    }
}

fn write_artifact(artifacts_dir: &Path, name: &str, abi: serde_json::Value) {
    let source = format!("contracts/{name}.sol");
    let source_dir = artifacts_dir.join(&source);
    fs::create_dir_all(&source_dir).unwrap();

    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": name,
        "sourceName": source,
        "abi": abi,
        "bytecode": "0x608060405234801561001057600080fd5b50",
        "deployedBytecode": "0x6080604052",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    fs::write(source_dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
}

/// Writes artifacts for both contracts, `FrakedSat` taking the market address
fn setup_artifacts() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_artifact(dir.path(), "FrakMarket", json!([]));
    write_artifact(
        dir.path(),
        "FrakedSat",
        json!([{
            "type": "constructor",
            "inputs": [{ "name": "_market", "type": "address", "internalType": "address" }],
            "stateMutability": "nonpayable"
        }]),
    );
    dir
}

#[tokio::test]
async fn test_deploy_in_order() {
    let artifacts = setup_artifacts();
    let deployer = MockDeployer::default();
    let mut out = Vec::new();

    let report = deploy_frak_contracts(&deployer, artifacts.path(), None, &mut out)
        .await
        .unwrap();

    let market = Address::repeat_byte(1);
    let sat = Address::repeat_byte(2);
    assert_eq!(report, DeploymentReport { market, sat });

    assert_eq!(
        deployer.calls(),
        vec![
            ("FrakMarket".to_string(), Vec::<DynSolValue>::new()),
            ("FrakedSat".to_string(), vec![DynSolValue::Address(market)]),
        ]
    );

    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        out,
        format!("frakMarket deployed to:  {market}\nfrakedSat deployed to:  {sat}\n")
    );
}

#[tokio::test]
async fn test_market_failure_skips_sat() {
    let artifacts = setup_artifacts();
    let deployer = MockDeployer::failing_on("FrakMarket");
    let mut out = Vec::new();

    let res = deploy_frak_contracts(&deployer, artifacts.path(), None, &mut out).await;

    assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));
    assert_eq!(deployer.calls().len(), 1);
    assert_eq!(deployer.calls()[0].0, "FrakMarket");
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_sat_failure_keeps_market() {
    let artifacts = setup_artifacts();
    let deployments = TempDir::new().unwrap();
    let deployments_path = deployments.path().join("deployments.json");
    let deployer = MockDeployer::failing_on("FrakedSat");
    let mut out = Vec::new();

    let res = deploy_frak_contracts(
        &deployer,
        artifacts.path(),
        Some(&deployments_path),
        &mut out,
    )
    .await;
    assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));

    // The market line was printed before the failure, and nothing was undone
    let market = Address::repeat_byte(1);
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out, format!("frakMarket deployed to:  {market}\n"));
    assert_eq!(deployer.calls().len(), 2);

    assert_eq!(
        read_deployment(&deployments_path, "FrakMarket").unwrap(),
        market
    );
    assert!(read_deployment(&deployments_path, "FrakedSat").is_err());
}

#[tokio::test]
async fn test_missing_sat_artifact() {
    let dir = TempDir::new().unwrap();
    write_artifact(dir.path(), "FrakMarket", json!([]));
    let deployer = MockDeployer::default();
    let mut out = Vec::new();

    let res = deploy_frak_contracts(&deployer, dir.path(), None, &mut out).await;

    assert!(matches!(res, Err(ScriptError::ArtifactNotFound(_))));
    assert_eq!(deployer.calls().len(), 1);
}

#[tokio::test]
async fn test_rerun_deploys_again() {
    let artifacts = setup_artifacts();
    let deployments = TempDir::new().unwrap();
    let deployments_path = deployments.path().join("deployments.json");
    let deployer = MockDeployer::default();

    let first = deploy_frak_contracts(
        &deployer,
        artifacts.path(),
        Some(&deployments_path),
        &mut Vec::new(),
    )
    .await
    .unwrap();
    let second = deploy_frak_contracts(
        &deployer,
        artifacts.path(),
        Some(&deployments_path),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    assert_eq!(deployer.calls().len(), 4);
    assert_ne!(first.market, second.market);
    assert_ne!(first.sat, second.sat);

    // The second sat is constructed with the second market
    assert_eq!(
        deployer.calls()[3].1,
        vec![DynSolValue::Address(second.market)]
    );
    assert_eq!(
        read_deployment(&deployments_path, "FrakedSat").unwrap(),
        second.sat
    );
}
