//! The create-item and mint-character forms
//!
//! A form holds the raw text the operator entered. Submitting validates it
//! and turns it into the single call the form makes.

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use crate::{
    calls::{GameCall, PendingCall},
    constants::DEFAULT_CHARACTER_STAT,
    errors::ScriptError,
    types::{CharacterClass, GameContract},
};

/// Parse a non-negative integer field
fn parse_amount(field: &str, value: &str) -> Result<U256, ScriptError> {
    U256::from_str(value.trim()).map_err(|_| {
        ScriptError::InvalidInput(format!("{field} must be a non-negative integer, got {value:?}"))
    })
}

/// Fail if any of the named fields is blank
fn require_filled(fields: &[(&str, &str)], message: &str) -> Result<(), ScriptError> {
    let missing: Vec<_> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScriptError::InvalidInput(format!("{message} (missing: {})", missing.join(", "))))
    }
}

/// The admin form creating a new item type on `GameItem`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateItemForm {
    /// Item name
    pub name: String,
    /// Item description
    pub description: String,
    /// Initial supply minted to the creator
    pub initial_supply: String,
}

impl Default for CreateItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            initial_supply: "0".to_string(),
        }
    }
}

impl CreateItemForm {
    /// Validate the form and build `createItemType`, minting the supply to `creator`
    pub fn submit(&self, item: Address, creator: Address) -> Result<PendingCall, ScriptError> {
        require_filled(
            &[("name", self.name.as_str()), ("description", self.description.as_str())],
            "Please fill in item name and description.",
        )?;
        let initial_supply = parse_amount("initial supply", &self.initial_supply)?;

        Ok(PendingCall::new(
            GameContract::Item,
            item,
            GameCall::CreateItemType {
                name: self.name.clone(),
                description: self.description.clone(),
                initial_supply,
                recipient: creator,
            },
        ))
    }
}

/// The player form minting a new character through `GameLogic`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintCharacterForm {
    /// Character name
    pub name: String,
    /// Character description
    pub description: String,
    /// Character class
    pub class: CharacterClass,
    /// Strength stat
    pub strength: String,
    /// Dexterity stat
    pub dexterity: String,
    /// Intelligence stat
    pub intelligence: String,
}

impl Default for MintCharacterForm {
    fn default() -> Self {
        let stat = DEFAULT_CHARACTER_STAT.to_string();
        Self {
            name: String::new(),
            description: String::new(),
            class: CharacterClass::default(),
            strength: stat.clone(),
            dexterity: stat.clone(),
            intelligence: stat,
        }
    }
}

impl MintCharacterForm {
    /// Validate the form and build `playerMintNewCharacter`
    pub fn submit(&self, logic: Address) -> Result<PendingCall, ScriptError> {
        require_filled(
            &[
                ("name", self.name.as_str()),
                ("description", self.description.as_str()),
                ("strength", self.strength.as_str()),
                ("dexterity", self.dexterity.as_str()),
                ("intelligence", self.intelligence.as_str()),
            ],
            "Please fill in all fields, including name and description.",
        )?;

        Ok(PendingCall::new(
            GameContract::Logic,
            logic,
            GameCall::PlayerMintNewCharacter {
                name: self.name.clone(),
                description: self.description.clone(),
                character_class: self.class,
                strength: parse_amount("strength", self.strength.as_str())?,
                dexterity: parse_amount("dexterity", self.dexterity.as_str())?,
                intelligence: parse_amount("intelligence", self.intelligence.as_str())?,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: Address = Address::repeat_byte(0x1e);
    const LOGIC: Address = Address::repeat_byte(0x10);
    const ADMIN: Address = Address::repeat_byte(0xad);

    #[test]
    fn test_create_item_mints_supply_to_creator() {
        let form = CreateItemForm {
            name: "Health Potion".to_string(),
            description: "Restores 50 health points.".to_string(),
            initial_supply: "100".to_string(),
        };

        let call = form.submit(ITEM, ADMIN).unwrap();
        assert_eq!(call.target, ITEM);
        assert_eq!(
            call.call,
            GameCall::CreateItemType {
                name: form.name.clone(),
                description: form.description.clone(),
                initial_supply: U256::from(100),
                recipient: ADMIN,
            }
        );
    }

    #[test]
    fn test_create_item_requires_name_and_description() {
        let form = CreateItemForm {
            name: "Health Potion".to_string(),
            ..Default::default()
        };
        assert!(matches!(form.submit(ITEM, ADMIN), Err(ScriptError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_supply_is_rejected() {
        let form = CreateItemForm {
            name: "Health Potion".to_string(),
            description: "Restores 50 health points.".to_string(),
            initial_supply: "-1".to_string(),
        };
        assert!(matches!(form.submit(ITEM, ADMIN), Err(ScriptError::InvalidInput(_))));
    }

    #[test]
    fn test_mint_character_defaults() {
        let form = MintCharacterForm {
            name: "Sir Reginald the Brave".to_string(),
            description: "A valiant knight".to_string(),
            class: CharacterClass::Rogue,
            ..Default::default()
        };

        let call = form.submit(LOGIC).unwrap();
        assert_eq!(call.contract, GameContract::Logic);
        let GameCall::PlayerMintNewCharacter {
            character_class,
            strength,
            dexterity,
            intelligence,
            ..
        } = call.call
        else {
            panic!("unexpected call {}", call.call);
        };
        assert_eq!(character_class, CharacterClass::Rogue);
        let ten = U256::from(10);
        assert_eq!((strength, dexterity, intelligence), (ten, ten, ten));
    }

    #[test]
    fn test_mint_character_requires_every_field() {
        let form = MintCharacterForm {
            name: "Sir Reginald the Brave".to_string(),
            description: "A valiant knight".to_string(),
            dexterity: " ".to_string(),
            ..Default::default()
        };

        let err = form.submit(LOGIC).unwrap_err();
        assert!(err.to_string().contains("dexterity"));
    }
}
