//! The contract registry: compiled artifacts in, persisted deployment records out
//!
//! Deployment records live in one JSON file per network, keyed by contract
//! name. Deploying a contract whose init code is unchanged since the recorded
//! deployment, and whose code is still on-chain, is a no-op.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{keccak256, Address, Bytes, TxHash, B256};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    chain::ChainBackend,
    constants::JSON_EXTENSION,
    errors::ScriptError,
    types::{GameAddresses, GameContract},
};

// -----------
// | Records |
// -----------

/// A contract deployment on one network
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The name the contract was deployed under
    pub contract_name: String,
    /// The deployed address
    pub address: Address,
    /// The ABI-encoded constructor arguments
    pub constructor_args: Bytes,
    /// The keccak hash of bytecode ++ constructor arguments
    pub init_code_hash: B256,
    /// The creation transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
}

/// The deployments file of a single network
#[derive(Clone, Debug, Default)]
pub struct DeploymentsFile {
    /// Where the records are persisted
    path: PathBuf,
    /// The records, keyed by contract name
    records: BTreeMap<String, DeploymentRecord>,
}

impl DeploymentsFile {
    /// The path of the deployments file for `network` under `dir`
    pub fn path_for_network(dir: &Path, network: &str) -> PathBuf {
        dir.join(format!("{network}.{JSON_EXTENSION}"))
    }

    /// Load the records at `path`; a missing file is an empty registry
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        if !path.exists() {
            return Ok(Self {
                path: path.to_path_buf(),
                records: BTreeMap::new(),
            });
        }

        let contents =
            fs::read_to_string(path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;
        let records = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Write the records back to disk, creating parent directories as needed
    pub fn save(&self) -> Result<(), ScriptError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(&self.records)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
    }

    /// The record of `contract`, if deployed
    pub fn get(&self, contract: GameContract) -> Option<&DeploymentRecord> {
        self.records.get(contract.name())
    }

    /// Insert or replace a record
    pub fn insert(&mut self, record: DeploymentRecord) {
        self.records.insert(record.contract_name.clone(), record);
    }

    /// The address of `contract`, or an error if it was never deployed
    pub fn address_of(&self, contract: GameContract) -> Result<Address, ScriptError> {
        self.get(contract)
            .map(|record| record.address)
            .ok_or_else(|| ScriptError::MissingDeployment(contract.name().to_string()))
    }

    /// The addresses of the contracts the read views query
    ///
    /// Only `GameCharacter` and `GameItem` must be deployed.
    pub fn view_addresses(&self) -> Result<GameAddresses, ScriptError> {
        Ok(GameAddresses {
            character: self.address_of(GameContract::Character)?,
            item: self.address_of(GameContract::Item)?,
        })
    }
}

// -------------
// | Artifacts |
// -------------

/// A source of contract creation bytecode
pub trait ArtifactSource {
    /// The creation bytecode of `contract`, without constructor arguments
    fn bytecode(&self, contract: GameContract) -> Result<Bytes, ScriptError>;
}

/// The `bytecode` field of an artifact, in either Hardhat or Foundry layout
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat: `"bytecode": "0x..."`
    Hex(Bytes),
    /// Foundry: `"bytecode": { "object": "0x..." }`
    Object {
        /// The creation bytecode
        object: Bytes,
    },
}

/// The subset of a compilation artifact the registry needs
#[derive(Deserialize)]
struct Artifact {
    /// The creation bytecode
    bytecode: ArtifactBytecode,
}

/// Compilation artifacts stored as `<dir>/<ContractName>.json`
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The artifacts directory
    dir: PathBuf,
}

impl ArtifactStore {
    /// Read artifacts from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSource for ArtifactStore {
    fn bytecode(&self, contract: GameContract) -> Result<Bytes, ScriptError> {
        let path = self.dir.join(contract.name()).with_extension(JSON_EXTENSION);
        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
        let artifact: Artifact = serde_json::from_str(&contents)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

        let bytecode = match artifact.bytecode {
            ArtifactBytecode::Hex(code) | ArtifactBytecode::Object { object: code } => code,
        };
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                path.display()
            )));
        }

        Ok(bytecode)
    }
}

// ------------
// | Registry |
// ------------

/// Options for a single deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployOptions {
    /// The account expected to sign the deployment
    pub from: Address,
    /// The ABI-encoded constructor arguments
    pub args: Bytes,
}

/// The result of [`Registry::deploy`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployResult {
    /// The (possibly pre-existing) deployment record
    pub record: DeploymentRecord,
    /// Whether a creation transaction was sent in this run
    pub newly_deployed: bool,
}

/// Deploys contracts through a [`ChainBackend`] and records them per network
pub struct Registry<'a, B, A> {
    /// The chain deployments are sent to
    backend: &'a B,
    /// Where creation bytecode comes from
    artifacts: A,
    /// The persisted records for the target network
    deployments: DeploymentsFile,
}

impl<'a, B: ChainBackend, A: ArtifactSource> Registry<'a, B, A> {
    /// Create a registry over the given backend, artifacts and records
    pub fn new(backend: &'a B, artifacts: A, deployments: DeploymentsFile) -> Self {
        Self {
            backend,
            artifacts,
            deployments,
        }
    }

    /// The backend deployments are sent through
    pub fn backend(&self) -> &'a B {
        self.backend
    }

    /// Deploy `contract`, or reuse the recorded deployment if nothing changed
    pub async fn deploy(
        &mut self,
        contract: GameContract,
        options: DeployOptions,
    ) -> Result<DeployResult, ScriptError> {
        let signer = self.backend.signer_address();
        if options.from != signer {
            return Err(ScriptError::ContractDeployment(format!(
                "{contract} must be deployed from {}, but the signer is {signer}",
                options.from
            )));
        }

        let bytecode = self.artifacts.bytecode(contract)?;
        let init_code: Bytes = [bytecode.as_ref(), options.args.as_ref()].concat().into();
        let init_code_hash = keccak256(&init_code);

        if let Some(existing) = self.deployments.get(contract) {
            if existing.init_code_hash == init_code_hash
                && self.backend.has_code(existing.address).await?
            {
                info!("reusing deployment of {} at {}", contract, existing.address);
                return Ok(DeployResult {
                    record: existing.clone(),
                    newly_deployed: false,
                });
            }
        }

        info!("deploying {} from {}", contract, signer);
        let deployed = self.backend.deploy_contract(init_code).await?;
        info!(
            "deployed {} at {} (tx: {:#x})",
            contract, deployed.address, deployed.tx_hash
        );

        let record = DeploymentRecord {
            contract_name: contract.name().to_string(),
            address: deployed.address,
            constructor_args: options.args,
            init_code_hash,
            transaction_hash: Some(deployed.tx_hash),
        };
        self.deployments.insert(record.clone());
        self.deployments.save()?;

        Ok(DeployResult {
            record,
            newly_deployed: true,
        })
    }

    /// The recorded deployment of `contract`
    pub fn get(&self, contract: GameContract) -> Result<DeploymentRecord, ScriptError> {
        self.deployments
            .get(contract)
            .cloned()
            .ok_or_else(|| ScriptError::MissingDeployment(contract.name().to_string()))
    }
}
