//! In-memory chain and reader doubles for the unit tests

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};

use crate::{
    calls::{GameCall, PendingCall},
    chain::{ChainBackend, CharacterStats, Deployed, GameReader, ItemTypeInfo},
    errors::ScriptError,
    registry::ArtifactSource,
    types::{CharacterClass, GameContract},
};

// ---------
// | Chain |
// ---------

/// The mutable state of a [`MockChain`]
#[derive(Default)]
struct ChainState {
    /// The number of addresses and tx hashes handed out
    nonce: u64,
    /// The number of `deploy_contract` calls
    deploy_count: usize,
    /// The addresses with code
    code: HashSet<Address>,
    /// `Ownable` owners by contract
    owners: HashMap<Address, Address>,
    /// `(contract, minter)` pairs
    minters: HashSet<(Address, Address)>,
    /// The character contract recorded by each game logic contract
    logic_character: HashMap<Address, Address>,
    /// The item contract recorded by each game logic contract
    logic_item: HashMap<Address, Address>,
    /// Every call passed to `submit`, including failed ones
    submitted: Vec<PendingCall>,
    /// Functions whose calls revert
    failing: HashSet<&'static str>,
}

impl ChainState {
    fn next_address(&mut self) -> Address {
        self.nonce += 1;
        let mut bytes = [0xc0; 20];
        bytes[12..].copy_from_slice(&self.nonce.to_be_bytes());
        Address::from(bytes)
    }

    fn next_tx_hash(&mut self) -> TxHash {
        self.nonce += 1;
        keccak256(self.nonce.to_be_bytes())
    }
}

/// An in-memory chain enforcing `Ownable` and minter permissions
pub struct MockChain {
    /// The signing account
    signer: Address,
    /// The chain state
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new(signer: Address) -> Self {
        Self {
            signer,
            state: Mutex::new(ChainState::default()),
        }
    }

    /// Place a contract owned by `owner` on-chain, outside of any deployment
    pub fn deploy_owned_by(&self, owner: Address) -> Address {
        let mut state = self.state.lock().unwrap();
        let address = state.next_address();
        state.code.insert(address);
        state.owners.insert(address, owner);
        address
    }

    /// Make every call to `function` revert
    pub fn fail_function(&self, function: &'static str) {
        self.state.lock().unwrap().failing.insert(function);
    }

    /// Remove the code at `address`, as a chain reset would
    pub fn wipe_code(&self, address: Address) {
        self.state.lock().unwrap().code.remove(&address);
    }

    pub fn deploy_count(&self) -> usize {
        self.state.lock().unwrap().deploy_count
    }

    pub fn submitted(&self) -> Vec<PendingCall> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn owner(&self, address: Address) -> Option<Address> {
        self.state.lock().unwrap().owners.get(&address).copied()
    }

    pub fn is_minter(&self, contract: Address, minter: Address) -> bool {
        self.state.lock().unwrap().minters.contains(&(contract, minter))
    }

    pub fn logic_character(&self, logic: Address) -> Option<Address> {
        self.state.lock().unwrap().logic_character.get(&logic).copied()
    }

    pub fn logic_item(&self, logic: Address) -> Option<Address> {
        self.state.lock().unwrap().logic_item.get(&logic).copied()
    }
}

/// Revert unless `caller` owns `target`
fn only_owner(state: &ChainState, target: Address, caller: Address) -> Result<(), String> {
    match state.owners.get(&target) {
        Some(owner) if *owner == caller => Ok(()),
        _ => Err(format!("OwnableUnauthorizedAccount({caller})")),
    }
}

impl ChainBackend for MockChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn deploy_contract(&self, init_code: Bytes) -> Result<Deployed, ScriptError> {
        let mut state = self.state.lock().unwrap();
        state.deploy_count += 1;

        // The game logic constructor takes its owner, everything else is owned by the deployer
        let owner = if init_code.starts_with(LOGIC_BYTECODE) {
            Address::from_slice(&init_code[init_code.len() - 20..])
        } else {
            self.signer
        };

        let address = state.next_address();
        state.code.insert(address);
        state.owners.insert(address, owner);
        Ok(Deployed {
            address,
            tx_hash: state.next_tx_hash(),
        })
    }

    async fn has_code(&self, address: Address) -> Result<bool, ScriptError> {
        Ok(self.state.lock().unwrap().code.contains(&address))
    }

    async fn owner_of(&self, address: Address) -> Result<Address, ScriptError> {
        self.owner(address)
            .ok_or_else(|| ScriptError::ContractInteraction(format!("no contract at {address}")))
    }

    async fn submit(&self, call: &PendingCall) -> Result<TxHash, ScriptError> {
        let mut state = self.state.lock().unwrap();
        state.submitted.push(call.clone());

        let target = call.target;
        let revert = |reason: String| ScriptError::ContractInteraction(format!("{call}: {reason}"));
        if state.failing.contains(call.call.function_name()) {
            return Err(revert("execution reverted".to_string()));
        }
        if !state.code.contains(&target) {
            return Err(revert(format!("no contract at {target}")));
        }

        match &call.call {
            GameCall::TransferOwnership { new_owner } => {
                only_owner(&state, target, self.signer).map_err(revert)?;
                state.owners.insert(target, *new_owner);
            }
            GameCall::SetGameCharacterContract { game_character } => {
                only_owner(&state, target, self.signer).map_err(revert)?;
                state.logic_character.insert(target, *game_character);
            }
            GameCall::SetGameItemContract { game_item } => {
                only_owner(&state, target, self.signer).map_err(revert)?;
                state.logic_item.insert(target, *game_item);
            }
            GameCall::SetMinter { minter } => {
                only_owner(&state, target, self.signer).map_err(revert)?;
                state.minters.insert((target, *minter));
            }
            GameCall::CreateItemType { .. } => {
                only_owner(&state, target, self.signer).map_err(revert)?;
            }
            GameCall::MintItem { .. } => {
                if !state.minters.contains(&(target, self.signer)) {
                    only_owner(&state, target, self.signer).map_err(revert)?;
                }
            }
            GameCall::PlayerMintNewCharacter { .. } => {}
        }

        Ok(state.next_tx_hash())
    }
}

// -------------
// | Artifacts |
// -------------

/// The creation bytecode of the mock game logic contract
const LOGIC_BYTECODE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x04];

/// Distinct creation bytecode for each game contract
pub struct TestArtifacts {
    /// A contract whose artifact is missing
    missing: Option<GameContract>,
}

impl TestArtifacts {
    /// Remove the artifact of `contract`
    pub fn without(self, contract: GameContract) -> Self {
        Self {
            missing: Some(contract),
        }
    }
}

pub fn test_artifacts() -> TestArtifacts {
    TestArtifacts { missing: None }
}

impl ArtifactSource for TestArtifacts {
    fn bytecode(&self, contract: GameContract) -> Result<Bytes, ScriptError> {
        if self.missing == Some(contract) {
            return Err(ScriptError::ArtifactParsing(format!("no artifact for {contract}")));
        }

        let code: &[u8] = match contract {
            GameContract::Character => &[0x60, 0x80, 0x60, 0x40, 0x01],
            GameContract::Item => &[0x60, 0x80, 0x60, 0x40, 0x02],
            GameContract::Token => &[0x60, 0x80, 0x60, 0x40, 0x03],
            GameContract::Logic => LOGIC_BYTECODE,
        };
        Ok(Bytes::from_static(code))
    }
}

// ----------
// | Reader |
// ----------

/// Character stats with the on-chain name `name`
pub fn test_stats(name: &str) -> CharacterStats {
    CharacterStats {
        name: name.to_string(),
        description: format!("{name}, on-chain"),
        level: U256::from(1),
        experience: U256::ZERO,
        class: CharacterClass::Warrior,
        strength: U256::from(10),
        dexterity: U256::from(10),
        intelligence: U256::from(10),
    }
}

/// A [`GameReader`] over fixed data; missing entries are read errors
#[derive(Default)]
pub struct MockReader {
    /// The viewer's character ids, in index order
    pub owned: Vec<U256>,
    /// Stats by character id
    pub stats: HashMap<U256, CharacterStats>,
    /// Token URIs by character id
    pub uris: HashMap<U256, String>,
    /// Whether `tokenOfOwnerByIndex` fails
    pub fail_enumeration: bool,
    /// Item types with the viewer's balance, the first has id 1
    pub item_types: Vec<(ItemTypeInfo, U256)>,
    /// Item ids whose reads fail
    pub failing_items: HashSet<U256>,
    /// Item ids whose `uri` read fails
    pub failing_uris: HashSet<U256>,
}

impl MockReader {
    /// Register an item type of which the viewer holds `balance`
    pub fn add_item_type(&mut self, name: &str, balance: U256) {
        let info = ItemTypeInfo {
            name: name.to_string(),
            description: format!("A {name}"),
        };
        self.item_types.push((info, balance));
    }

    fn item(&self, id: U256) -> Result<&(ItemTypeInfo, U256), ScriptError> {
        let err = || ScriptError::ContractInteraction(format!("item {id} reverted"));
        if self.failing_items.contains(&id) || id.is_zero() {
            return Err(err());
        }
        self.item_types.get(id.to::<usize>() - 1).ok_or_else(err)
    }
}

impl GameReader for MockReader {
    async fn character_balance(&self, _owner: Address) -> Result<U256, ScriptError> {
        Ok(U256::from(self.owned.len()))
    }

    async fn character_of_owner_by_index(
        &self,
        _owner: Address,
        index: U256,
    ) -> Result<U256, ScriptError> {
        if self.fail_enumeration {
            return Err(ScriptError::ContractInteraction("enumeration reverted".to_string()));
        }
        self.owned
            .get(index.to::<usize>())
            .copied()
            .ok_or_else(|| ScriptError::ContractInteraction(format!("index {index} out of bounds")))
    }

    async fn character_stats(&self, token_id: U256) -> Result<CharacterStats, ScriptError> {
        self.stats
            .get(&token_id)
            .cloned()
            .ok_or_else(|| ScriptError::ContractInteraction(format!("no stats for {token_id}")))
    }

    async fn character_token_uri(&self, token_id: U256) -> Result<String, ScriptError> {
        self.uris
            .get(&token_id)
            .cloned()
            .ok_or_else(|| ScriptError::ContractInteraction(format!("no uri for {token_id}")))
    }

    async fn next_item_type_id(&self) -> Result<U256, ScriptError> {
        Ok(U256::from(self.item_types.len() + 1))
    }

    async fn item_type(&self, id: U256) -> Result<ItemTypeInfo, ScriptError> {
        self.item(id).map(|(info, _)| info.clone())
    }

    async fn item_uri(&self, id: U256) -> Result<String, ScriptError> {
        if self.failing_uris.contains(&id) {
            return Err(ScriptError::ContractInteraction(format!("uri {id} reverted")));
        }
        self.item(id).map(|_| format!("https://api.yourgame.com/items/{id}.json"))
    }

    async fn item_balance(&self, _owner: Address, id: U256) -> Result<U256, ScriptError> {
        self.item(id).map(|(_, balance)| *balance)
    }
}
