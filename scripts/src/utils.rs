//! Utilities for the game scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Serialize;
use tracing::info;

use crate::{chain::AlloyChain, errors::ScriptError};

/// Sets up the signing client for the given private key and RPC url,
/// querying the node for its chain id.
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<AlloyChain, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer_address = signer.address();

    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(url));

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!("connected to chain {chain_id} as {signer_address}");

    Ok(AlloyChain::new(provider, signer_address, chain_id))
}

/// Write `value` as pretty-printed JSON, creating parent directories as needed
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    }

    let contents =
        serde_json::to_string_pretty(value).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
}
