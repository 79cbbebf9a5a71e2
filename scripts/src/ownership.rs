//! Handing ownership of a freshly deployed contract to the administrator

use alloy::primitives::{Address, TxHash};
use tracing::{error, info, warn};

use crate::{
    calls::{GameCall, PendingCall},
    chain::ChainBackend,
    config::Administration,
    types::GameContract,
};

/// What happened to the ownership of a deployed contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnershipOutcome {
    /// The deployer is the administrator, nothing to transfer
    AlreadyAdmin,
    /// A reused deployment was already owned by the administrator
    AlreadyTransferred,
    /// Ownership was transferred in the given transaction
    Transferred(TxHash),
    /// The transfer failed; the deployer still owns the contract
    Failed(String),
}

impl OwnershipOutcome {
    /// Whether the administrator ended up owning the contract
    pub fn admin_owns(&self) -> bool {
        !matches!(self, OwnershipOutcome::Failed(_))
    }
}

/// Transfer ownership of `contract` at `address` from the deployer to `admin`
///
/// A failed transfer is logged and reported in the outcome, it never aborts
/// the deployment run. `reused` marks a deployment recorded by an earlier run,
/// whose owner is checked first so a resumed run does not transfer twice.
pub async fn transfer_ownership_step<B: ChainBackend>(
    backend: &B,
    contract: GameContract,
    address: Address,
    admin: Address,
    network: &str,
    reused: bool,
) -> OwnershipOutcome {
    let deployer = backend.signer_address();
    if Administration::resolve(deployer, admin) == Administration::SelfAdministered {
        info!("{contract} deployer is already the admin: {admin}. No ownership transfer needed.");
        return OwnershipOutcome::AlreadyAdmin;
    }

    if reused {
        match backend.owner_of(address).await {
            Ok(owner) if owner == admin => {
                info!("{contract} is already owned by {admin}");
                return OwnershipOutcome::AlreadyTransferred;
            }
            Ok(owner) => info!("{contract} is still owned by {owner}"),
            Err(e) => warn!("could not read the owner of {contract}: {e}"),
        }
    }

    info!("Attempting to transfer ownership of {contract} to: {admin}... (Network: {network})");
    let call = PendingCall::new(
        contract,
        address,
        GameCall::TransferOwnership { new_owner: admin },
    );

    match backend.submit(&call).await {
        Ok(tx_hash) => {
            info!("{contract} ownership transferred to {admin}");
            OwnershipOutcome::Transferred(tx_hash)
        }
        Err(e) => {
            error!("Failed to transfer ownership of {contract}: {e}");
            OwnershipOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockChain;

    const ADMIN: Address = Address::repeat_byte(0xad);
    const DEPLOYER: Address = Address::repeat_byte(0xde);

    #[tokio::test]
    async fn test_no_transfer_when_deployer_is_admin() {
        let chain = MockChain::new(ADMIN);
        let address = chain.deploy_owned_by(ADMIN);

        let outcome =
            transfer_ownership_step(&chain, GameContract::Item, address, ADMIN, "local", false)
                .await;

        assert_eq!(outcome, OwnershipOutcome::AlreadyAdmin);
        assert!(chain.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_to_admin() {
        let chain = MockChain::new(DEPLOYER);
        let address = chain.deploy_owned_by(DEPLOYER);

        let outcome =
            transfer_ownership_step(&chain, GameContract::Token, address, ADMIN, "local", false)
                .await;

        assert!(matches!(outcome, OwnershipOutcome::Transferred(_)));
        assert_eq!(chain.owner(address), Some(ADMIN));
    }

    #[tokio::test]
    async fn test_failed_transfer_is_not_fatal() {
        let chain = MockChain::new(DEPLOYER);
        let address = chain.deploy_owned_by(DEPLOYER);
        chain.fail_function("transferOwnership");

        let outcome = transfer_ownership_step(
            &chain,
            GameContract::Character,
            address,
            ADMIN,
            "local",
            false,
        )
        .await;

        assert!(matches!(outcome, OwnershipOutcome::Failed(_)));
        assert!(!outcome.admin_owns());
        // The deployer keeps ownership, never some third address
        assert_eq!(chain.owner(address), Some(DEPLOYER));
    }

    #[tokio::test]
    async fn test_resumed_run_skips_completed_transfer() {
        let chain = MockChain::new(DEPLOYER);
        let address = chain.deploy_owned_by(ADMIN);

        let outcome =
            transfer_ownership_step(&chain, GameContract::Item, address, ADMIN, "local", true)
                .await;

        assert_eq!(outcome, OwnershipOutcome::AlreadyTransferred);
        assert!(chain.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_resumed_run_retries_failed_transfer() {
        let chain = MockChain::new(DEPLOYER);
        let address = chain.deploy_owned_by(DEPLOYER);

        let outcome =
            transfer_ownership_step(&chain, GameContract::Item, address, ADMIN, "local", true)
                .await;

        assert!(matches!(outcome, OwnershipOutcome::Transferred(_)));
        assert_eq!(chain.owner(address), Some(ADMIN));
    }
}
