//! Minting a list of items on `GameItem` from the signer

use std::{fs, path::Path};

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    calls::{GameCall, PendingCall},
    chain::ChainBackend,
    constants::DEFAULT_BATCH_MINT,
    errors::ScriptError,
    types::GameContract,
};

/// One entry of the batch
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MintRequest {
    /// The item type id, which must already exist
    pub id: u64,
    /// The number of items to mint
    pub amount: u64,
    /// The recipient; empty mints to the signer
    #[serde(default)]
    pub recipient: String,
}

impl MintRequest {
    /// The recipient address, defaulting to `signer` when none was given
    pub fn resolve_recipient(&self, signer: Address) -> Result<Address, ScriptError> {
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Ok(signer);
        }

        recipient
            .parse()
            .map_err(|e| ScriptError::InvalidInput(format!("recipient {recipient:?}: {e}")))
    }
}

/// The batch minted when no list is given
pub fn default_requests() -> Vec<MintRequest> {
    DEFAULT_BATCH_MINT
        .iter()
        .map(|&(id, amount, recipient)| MintRequest {
            id,
            amount,
            recipient: recipient.to_string(),
        })
        .collect()
}

/// Load a JSON array of mint requests
pub fn load_requests(path: &Path) -> Result<Vec<MintRequest>, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// The outcome of a batch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchMintReport {
    /// The confirmed mints
    pub minted: Vec<(MintRequest, TxHash)>,
    /// The mints that failed, with the reason
    pub failed: Vec<(MintRequest, String)>,
}

/// Mint every request in order, each confirmed before the next is sent
///
/// A failed mint is logged and the batch moves on to the next request.
pub async fn batch_mint<B: ChainBackend>(
    backend: &B,
    item: Address,
    requests: &[MintRequest],
) -> BatchMintReport {
    let signer = backend.signer_address();
    let mut report = BatchMintReport::default();

    for request in requests {
        let result = match request.resolve_recipient(signer) {
            Ok(to) => {
                info!(
                    "Minting item ID: {}, Amount: {} to Recipient: {} (using mintItem)",
                    request.id, request.amount, to
                );
                let call = PendingCall::new(
                    GameContract::Item,
                    item,
                    GameCall::MintItem {
                        to,
                        id: U256::from(request.id),
                        amount: U256::from(request.amount),
                        data: Bytes::new(),
                    },
                );
                backend.submit(&call).await.map(|tx| (to, tx))
            }
            Err(e) => Err(e),
        };

        match result {
            Ok((to, tx_hash)) => {
                info!(
                    "  Successfully minted {} of item ID {} to {}. Tx: {:#x}",
                    request.amount, request.id, to, tx_hash
                );
                report.minted.push((request.clone(), tx_hash));
            }
            Err(e) => {
                error!("  Failed to mint item ID {}: {}", request.id, e);
                report.failed.push((request.clone(), e.to_string()));
            }
        }
    }

    info!("Batch minting process complete.");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;

    const SIGNER: Address = Address::repeat_byte(0x5e);

    #[tokio::test]
    async fn test_default_batch_mints_to_signer() {
        let chain = MockChain::new(SIGNER);
        let item = chain.deploy_owned_by(SIGNER);

        let report = batch_mint(&chain, item, &default_requests()).await;

        assert_eq!(report.minted.len(), 2);
        assert!(report.failed.is_empty());
        let mints: Vec<_> = chain
            .submitted()
            .into_iter()
            .map(|call| (call.target, call.call))
            .collect();
        assert_eq!(
            mints,
            vec![
                (
                    item,
                    GameCall::MintItem {
                        to: SIGNER,
                        id: U256::from(1),
                        amount: U256::from(10),
                        data: Bytes::new(),
                    }
                ),
                (
                    item,
                    GameCall::MintItem {
                        to: SIGNER,
                        id: U256::from(2),
                        amount: U256::from(5),
                        data: Bytes::new(),
                    }
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_mint_does_not_stop_the_batch() {
        let chain = MockChain::new(SIGNER);
        let item = chain.deploy_owned_by(SIGNER);
        let requests = vec![
            MintRequest {
                id: 1,
                amount: 1,
                recipient: "not an address".to_string(),
            },
            MintRequest {
                id: 2,
                amount: 3,
                recipient: format!("{:#x}", Address::repeat_byte(0x77)),
            },
        ];

        let report = batch_mint(&chain, item, &requests).await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.minted.len(), 1);
        assert_eq!(report.minted[0].0.id, 2);
    }

    #[test]
    fn test_load_requests_defaults_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, r#"[{ "id": 3, "amount": 20 }]"#).unwrap();

        let requests = load_requests(&path).unwrap();
        assert_eq!(
            requests,
            vec![MintRequest {
                id: 3,
                amount: 20,
                recipient: String::new()
            }]
        );
        assert_eq!(requests[0].resolve_recipient(SIGNER).unwrap(), SIGNER);
    }
}
