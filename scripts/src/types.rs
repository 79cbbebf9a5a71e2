//! Type definitions used throughout the scripts

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::primitives::Address;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{GAME_CHARACTER_NAME, GAME_ITEM_NAME, GAME_LOGIC_NAME, GAME_TOKEN_NAME},
    errors::ScriptError,
};

/// The game contracts managed by the scripts
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameContract {
    /// The ERC721 character contract
    #[serde(rename = "GameCharacter")]
    Character,
    /// The ERC1155 item contract
    #[serde(rename = "GameItem")]
    Item,
    /// The ERC20 game token
    #[serde(rename = "GameToken")]
    Token,
    /// The game logic coordinator
    #[serde(rename = "GameLogic")]
    Logic,
}

impl GameContract {
    /// Every game contract, in declaration order
    pub const ALL: [GameContract; 4] = [
        GameContract::Character,
        GameContract::Item,
        GameContract::Token,
        GameContract::Logic,
    ];

    /// The name the contract is deployed and recorded under
    pub fn name(&self) -> &'static str {
        match self {
            GameContract::Character => GAME_CHARACTER_NAME,
            GameContract::Item => GAME_ITEM_NAME,
            GameContract::Token => GAME_TOKEN_NAME,
            GameContract::Logic => GAME_LOGIC_NAME,
        }
    }

    /// The deploy steps that must have completed before this one runs
    pub fn dependencies(&self) -> &'static [&'static str] {
        match self {
            GameContract::Logic => &[GAME_CHARACTER_NAME, GAME_ITEM_NAME],
            _ => &[],
        }
    }
}

impl Display for GameContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GameContract {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameContract::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScriptError::UnknownStep(s.to_string()))
    }
}

/// The class of a character, stored on-chain as a `uint8`
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Class 0
    #[default]
    Warrior,
    /// Class 1
    Mage,
    /// Class 2
    Rogue,
    /// Class 3
    Archer,
}

impl CharacterClass {
    /// Every class, indexed by its on-chain value
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Archer,
    ];

    /// The on-chain representation of the class
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for CharacterClass {
    type Error = ScriptError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CharacterClass::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ScriptError::InvalidInput(format!("unknown character class {value}")))
    }
}

impl Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Warrior => write!(f, "Warrior"),
            CharacterClass::Mage => write!(f, "Mage"),
            CharacterClass::Rogue => write!(f, "Rogue"),
            CharacterClass::Archer => write!(f, "Archer"),
        }
    }
}

/// The deployed addresses of the contracts read by the list views
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameAddresses {
    /// The `GameCharacter` contract
    pub character: Address,
    /// The `GameItem` contract
    pub item: Address,
}
