//! Definitions of errors that can occur during the execution of the game scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the game scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error reading a deployments file
    ReadDeployments(String),
    /// Error writing a deployments file
    WriteDeployments(String),
    /// Error reading or parsing a compilation artifact
    ArtifactParsing(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A contract was looked up before it was deployed on this network
    MissingDeployment(String),
    /// A deploy step depends on a step that does not exist
    UnknownStep(String),
    /// The declared step dependencies contain a cycle
    DependencyCycle(Vec<String>),
    /// Error decoding a token URI
    MetadataDecoding(String),
    /// User-supplied input failed validation
    InvalidInput(String),
    /// Error writing a file for the operator
    WriteFile(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::MissingDeployment(s) => write!(f, "no deployment found for {}", s),
            ScriptError::UnknownStep(s) => write!(f, "unknown deploy step: {}", s),
            ScriptError::DependencyCycle(steps) => {
                write!(f, "cyclic deploy step dependencies: {}", steps.join(" -> "))
            }
            ScriptError::MetadataDecoding(s) => write!(f, "error decoding token metadata: {}", s),
            ScriptError::InvalidInput(s) => write!(f, "invalid input: {}", s),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {}", s),
        }
    }
}

impl Error for ScriptError {}
