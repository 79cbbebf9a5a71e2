//! Descriptions of the state-changing calls the scripts make on the game contracts
//!
//! Every transaction the scripts submit is first described as a
//! [`PendingCall`]. The description is what gets executed when the signer is
//! allowed to make the call, and what gets handed to the operator when it is
//! not.

use std::fmt::{self, Display};

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use game_abi::{IGameCharacter, IGameItem, IGameLogic, IOwnable};
use serde::Serialize;

use crate::types::{CharacterClass, GameContract};

/// A state-changing function call on one of the game contracts
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "function", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameCall {
    /// `Ownable.transferOwnership(newOwner)`
    TransferOwnership {
        /// The account to hand ownership to
        new_owner: Address,
    },
    /// `GameLogic.setGameCharacterContract(gameCharacter)`
    SetGameCharacterContract {
        /// The character contract address
        game_character: Address,
    },
    /// `GameLogic.setGameItemContract(gameItem)`
    SetGameItemContract {
        /// The item contract address
        game_item: Address,
    },
    /// `setMinter(minter)` on the character or item contract
    SetMinter {
        /// The address to authorize as a minter
        minter: Address,
    },
    /// `GameItem.mintItem(to, id, amount, data)`
    MintItem {
        /// The recipient
        to: Address,
        /// The item type id
        id: U256,
        /// The number of items to mint
        amount: U256,
        /// Extra data forwarded to the ERC1155 receiver hook
        data: Bytes,
    },
    /// `GameItem.createItemType(name, description, initialSupply, recipient)`
    CreateItemType {
        /// The item type name
        name: String,
        /// The item type description
        description: String,
        /// The number of items minted to `recipient` on creation
        initial_supply: U256,
        /// The recipient of the initial supply
        recipient: Address,
    },
    /// `GameLogic.playerMintNewCharacter(...)`
    PlayerMintNewCharacter {
        /// The character name
        name: String,
        /// The character description
        description: String,
        /// The character class
        character_class: CharacterClass,
        /// Strength stat
        strength: U256,
        /// Dexterity stat
        dexterity: U256,
        /// Intelligence stat
        intelligence: U256,
    },
}

impl GameCall {
    /// The Solidity name of the called function
    pub fn function_name(&self) -> &'static str {
        match self {
            GameCall::TransferOwnership { .. } => "transferOwnership",
            GameCall::SetGameCharacterContract { .. } => "setGameCharacterContract",
            GameCall::SetGameItemContract { .. } => "setGameItemContract",
            GameCall::SetMinter { .. } => "setMinter",
            GameCall::MintItem { .. } => "mintItem",
            GameCall::CreateItemType { .. } => "createItemType",
            GameCall::PlayerMintNewCharacter { .. } => "playerMintNewCharacter",
        }
    }

    /// ABI-encode the call, selector included
    pub fn calldata(&self) -> Bytes {
        let encoded = match self.clone() {
            GameCall::TransferOwnership { new_owner } => {
                IOwnable::transferOwnershipCall { newOwner: new_owner }.abi_encode()
            }
            GameCall::SetGameCharacterContract { game_character } => {
                IGameLogic::setGameCharacterContractCall {
                    gameCharacter: game_character,
                }
                .abi_encode()
            }
            GameCall::SetGameItemContract { game_item } => {
                IGameLogic::setGameItemContractCall { gameItem: game_item }.abi_encode()
            }
            // The character and item contracts share the `setMinter` signature
            GameCall::SetMinter { minter } => IGameCharacter::setMinterCall { minter }.abi_encode(),
            GameCall::MintItem {
                to,
                id,
                amount,
                data,
            } => IGameItem::mintItemCall {
                to,
                id,
                amount,
                data,
            }
            .abi_encode(),
            GameCall::CreateItemType {
                name,
                description,
                initial_supply,
                recipient,
            } => IGameItem::createItemTypeCall {
                name,
                description,
                initialSupply: initial_supply,
                recipient,
            }
            .abi_encode(),
            GameCall::PlayerMintNewCharacter {
                name,
                description,
                character_class,
                strength,
                dexterity,
                intelligence,
            } => IGameLogic::playerMintNewCharacterCall {
                name,
                description,
                characterClass: character_class.as_u8(),
                strength,
                dexterity,
                intelligence,
            }
            .abi_encode(),
        };

        Bytes::from(encoded)
    }
}

impl Display for GameCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.function_name();
        match self {
            GameCall::TransferOwnership { new_owner } => write!(f, "{name}({new_owner})"),
            GameCall::SetGameCharacterContract { game_character } => {
                write!(f, "{name}({game_character})")
            }
            GameCall::SetGameItemContract { game_item } => write!(f, "{name}({game_item})"),
            GameCall::SetMinter { minter } => write!(f, "{name}({minter})"),
            GameCall::MintItem {
                to,
                id,
                amount,
                data,
            } => write!(f, "{name}({to}, {id}, {amount}, {data})"),
            GameCall::CreateItemType {
                name: item_name,
                description,
                initial_supply,
                recipient,
            } => write!(
                f,
                "{name}({item_name:?}, {description:?}, {initial_supply}, {recipient})"
            ),
            GameCall::PlayerMintNewCharacter {
                name: character_name,
                description,
                character_class,
                strength,
                dexterity,
                intelligence,
            } => write!(
                f,
                "{name}({:?}, {:?}, {}, {}, {}, {})",
                character_name,
                description,
                character_class.as_u8(),
                strength,
                dexterity,
                intelligence
            ),
        }
    }
}

/// A call on a specific deployed game contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCall {
    /// The contract the call targets
    pub contract: GameContract,
    /// The deployed address of `contract`
    pub target: Address,
    /// The function and its arguments
    pub call: GameCall,
}

impl PendingCall {
    /// Describe a call on `contract` deployed at `target`
    pub fn new(contract: GameContract, target: Address, call: GameCall) -> Self {
        Self {
            contract,
            target,
            call,
        }
    }
}

impl Display for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "On {} ({}), call {}", self.contract, self.target, self.call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calldata_starts_with_selector() {
        let minter = Address::repeat_byte(0x11);
        let call = GameCall::SetMinter { minter };
        let calldata = call.calldata();

        assert_eq!(&calldata[..4], IGameItem::setMinterCall::SELECTOR.as_slice());
        assert_eq!(&calldata[16..36], minter.as_slice());
    }

    #[test]
    fn test_pending_call_display_names_target_function_and_argument() {
        let target = Address::repeat_byte(0x22);
        let game_logic = Address::repeat_byte(0x33);
        let pending = PendingCall::new(
            GameContract::Item,
            target,
            GameCall::SetMinter { minter: game_logic },
        );

        let rendered = pending.to_string();
        assert!(rendered.contains("GameItem"));
        assert!(rendered.contains(&target.to_string()));
        assert!(rendered.contains(&format!("setMinter({game_logic})")));
    }

    #[test]
    fn test_pending_call_serializes_function_tag() {
        let pending = PendingCall::new(
            GameContract::Logic,
            Address::ZERO,
            GameCall::SetGameItemContract {
                game_item: Address::repeat_byte(0x44),
            },
        );

        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["contract"], "GameLogic");
        assert_eq!(json["call"]["function"], "setGameItemContract");
        assert!(json["call"]["gameItem"].is_string());
    }
}
