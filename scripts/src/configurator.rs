//! Wiring the game logic contract to the character and item contracts
//!
//! The configuration calls are owner-only on every contract they touch, and
//! after deployment the owner of each is the administrator. So they are made
//! here only when the deployer is the administrator; otherwise they are
//! returned to the operator as pending calls for the administrator to make.

use alloy::primitives::{Address, TxHash};
use tracing::{info, warn};

use crate::{
    calls::{GameCall, PendingCall},
    chain::ChainBackend,
    config::Administration,
    errors::ScriptError,
    types::GameContract,
};

/// The result of configuring the game logic contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationOutcome {
    /// Every call was made and confirmed, in plan order
    Configured(Vec<TxHash>),
    /// No call was attempted; the administrator has to make these
    ManualActionRequired(Vec<PendingCall>),
}

/// The calls that wire `logic` to `character` and `item`, in execution order
pub fn plan_configuration(character: Address, item: Address, logic: Address) -> Vec<PendingCall> {
    vec![
        PendingCall::new(
            GameContract::Logic,
            logic,
            GameCall::SetGameCharacterContract {
                game_character: character,
            },
        ),
        PendingCall::new(
            GameContract::Logic,
            logic,
            GameCall::SetGameItemContract { game_item: item },
        ),
        PendingCall::new(
            GameContract::Character,
            character,
            GameCall::SetMinter { minter: logic },
        ),
        PendingCall::new(
            GameContract::Item,
            item,
            GameCall::SetMinter { minter: logic },
        ),
    ]
}

/// Execute `plan` if the deployer administers the contracts, else hand it back
///
/// On the self-administered path each call is awaited before the next is
/// sent, and the first failure is returned as an error.
pub async fn configure_game_logic<B: ChainBackend>(
    backend: &B,
    admin: Address,
    plan: Vec<PendingCall>,
) -> Result<ConfigurationOutcome, ScriptError> {
    let deployer = backend.signer_address();
    match Administration::resolve(deployer, admin) {
        Administration::SelfAdministered => {
            info!("Deployer is the admin, proceeding with GameLogic configuration...");

            let mut tx_hashes = Vec::with_capacity(plan.len());
            for call in &plan {
                info!("{call}");
                let tx_hash = backend.submit(call).await?;
                info!("{} confirmed (tx: {:#x})", call.call.function_name(), tx_hash);
                tx_hashes.push(tx_hash);
            }

            Ok(ConfigurationOutcome::Configured(tx_hashes))
        }
        Administration::ExternallyAdministered => {
            warn!("ACTION REQUIRED: contracts are owned by {admin}, but deployer is {deployer}.");
            warn!("The following calls must be made by {admin}:");
            for call in &plan {
                warn!("  - {call}");
            }

            Ok(ConfigurationOutcome::ManualActionRequired(plan))
        }
    }
}
