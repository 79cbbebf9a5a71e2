//! Deployment configuration and the administrator decision

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};
use game_abi::{
    GameCharacterConstructor, GameItemConstructor, GameLogicConstructor, GameTokenConstructor,
};

use crate::{
    constants::{
        ADMIN_ADDRESS, DEFAULT_CHARACTER_BASE_URI, DEFAULT_ITEM_URI, DEFAULT_NETWORK,
        DEFAULT_TOKEN_INITIAL_SUPPLY, GAME_TOKEN_DECIMALS,
    },
    types::GameContract,
};

/// Who is able to make owner-only calls on the freshly deployed contracts
///
/// There are exactly two cases. When the deployer is the administrator the
/// scripts configure everything themselves; otherwise the administrator has
/// to make the owner-only calls out of band.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Administration {
    /// The deployer is the administrator
    SelfAdministered,
    /// The administrator is a different account than the deployer
    ExternallyAdministered,
}

impl Administration {
    /// Compare the deployer to the administrator
    ///
    /// Addresses are compared as bytes, so the comparison ignores the case
    /// (and checksum) of the hex strings they were parsed from.
    pub fn resolve(deployer: Address, admin: Address) -> Self {
        if deployer == admin {
            Administration::SelfAdministered
        } else {
            Administration::ExternallyAdministered
        }
    }
}

/// The inputs of a deployment run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployConfig {
    /// The intended long-term owner of every contract
    pub admin: Address,
    /// The name of the target network, used for logging and file naming
    pub network: String,
    /// `GameCharacter` constructor argument
    pub character_base_uri: String,
    /// `GameItem` constructor argument
    pub item_uri: String,
    /// `GameToken` constructor argument, in base units
    pub token_initial_supply: U256,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            admin: ADMIN_ADDRESS,
            network: DEFAULT_NETWORK.to_string(),
            character_base_uri: DEFAULT_CHARACTER_BASE_URI.to_string(),
            item_uri: DEFAULT_ITEM_URI.to_string(),
            token_initial_supply: whole_tokens(DEFAULT_TOKEN_INITIAL_SUPPLY),
        }
    }
}

impl DeployConfig {
    /// ABI-encoded constructor arguments for `contract`
    pub fn constructor_args(&self, contract: GameContract) -> Bytes {
        let encoded = match contract {
            GameContract::Character => GameCharacterConstructor {
                baseUri: self.character_base_uri.clone(),
            }
            .abi_encode_params(),
            GameContract::Item => GameItemConstructor {
                uri: self.item_uri.clone(),
            }
            .abi_encode_params(),
            GameContract::Token => GameTokenConstructor {
                initialSupply: self.token_initial_supply,
            }
            .abi_encode_params(),
            // The game logic contract is owned by the administrator from construction
            GameContract::Logic => GameLogicConstructor {
                initialOwner: self.admin,
            }
            .abi_encode_params(),
        };

        Bytes::from(encoded)
    }
}

/// Convert a whole number of game tokens into base units
pub fn whole_tokens(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10u64).pow(U256::from(GAME_TOKEN_DECIMALS))
}
