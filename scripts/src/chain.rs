//! The seam between the scripts and the chain
//!
//! [`ChainBackend`] covers everything the deployment and transaction flows
//! need, [`GameReader`] covers the read-only list views. [`AlloyChain`] and
//! [`AlloyReader`] implement them over an alloy provider.

#![allow(async_fn_in_trait)]

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::{RpcError, TransportErrorKind},
};
use game_abi::{IGameCharacter, IGameItem, IOwnable};
use tracing::debug;

use crate::{calls::PendingCall, errors::ScriptError, types::CharacterClass};

/// The provider type used by the scripts, a wallet-backed dynamic provider
pub type Wallet = DynProvider<Ethereum>;

/// A contract creation confirmed on-chain
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deployed {
    /// The address of the new contract
    pub address: Address,
    /// The creation transaction
    pub tx_hash: TxHash,
}

/// Write access to the chain through a single signing account
pub trait ChainBackend {
    /// The account that signs and pays for every transaction
    fn signer_address(&self) -> Address;

    /// Submit a contract creation transaction and wait for its receipt
    async fn deploy_contract(&self, init_code: Bytes) -> Result<Deployed, ScriptError>;

    /// Whether any code is deployed at `address`
    async fn has_code(&self, address: Address) -> Result<bool, ScriptError>;

    /// The current `Ownable` owner of the contract at `address`
    async fn owner_of(&self, address: Address) -> Result<Address, ScriptError>;

    /// Submit `call` and wait until it is confirmed
    ///
    /// A reverted transaction is an error.
    async fn submit(&self, call: &PendingCall) -> Result<TxHash, ScriptError>;
}

/// The on-chain stats of a character token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterStats {
    /// On-chain name, used when the token URI has none
    pub name: String,
    /// On-chain description, used when the token URI has none
    pub description: String,
    /// Character level
    pub level: U256,
    /// Accumulated experience
    pub experience: U256,
    /// Character class
    pub class: CharacterClass,
    /// Strength stat
    pub strength: U256,
    /// Dexterity stat
    pub dexterity: U256,
    /// Intelligence stat
    pub intelligence: U256,
}

/// The on-chain definition of an item type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemTypeInfo {
    /// Item type name
    pub name: String,
    /// Item type description
    pub description: String,
}

/// Read access to the character and item contracts
pub trait GameReader {
    /// The number of characters owned by `owner`
    async fn character_balance(&self, owner: Address) -> Result<U256, ScriptError>;

    /// The id of the `index`-th character owned by `owner`
    async fn character_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, ScriptError>;

    /// The stats of a character
    async fn character_stats(&self, token_id: U256) -> Result<CharacterStats, ScriptError>;

    /// The token URI of a character
    async fn character_token_uri(&self, token_id: U256) -> Result<String, ScriptError>;

    /// One past the highest item type id created so far
    async fn next_item_type_id(&self) -> Result<U256, ScriptError>;

    /// The definition of an item type
    async fn item_type(&self, id: U256) -> Result<ItemTypeInfo, ScriptError>;

    /// The metadata URI of an item type
    async fn item_uri(&self, id: U256) -> Result<String, ScriptError>;

    /// The number of items of type `id` held by `owner`
    async fn item_balance(&self, owner: Address, id: U256) -> Result<U256, ScriptError>;
}

// ---------------
// | Alloy Chain |
// ---------------

/// A [`ChainBackend`] over an alloy wallet provider
#[derive(Clone)]
pub struct AlloyChain {
    /// The wallet provider
    provider: Wallet,
    /// The address of the wallet's signer
    signer: Address,
    /// The chain id reported by the node
    chain_id: u64,
}

impl AlloyChain {
    /// Wrap a provider whose wallet signs as `signer`
    pub fn new(provider: Wallet, signer: Address, chain_id: u64) -> Self {
        Self {
            provider,
            signer,
            chain_id,
        }
    }

    /// The chain id reported by the node
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// A reader over the given character and item contracts
    pub fn reader(&self, character: Address, item: Address) -> AlloyReader {
        AlloyReader {
            provider: self.provider.clone(),
            character,
            item,
        }
    }

    /// Send a transaction and wait for a successful receipt
    async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, String> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| describe_rpc_error(&e))?;

        debug!("submitted tx {:#x}", pending.tx_hash());
        let receipt = pending.get_receipt().await.map_err(|e| e.to_string())?;
        if !receipt.status() {
            return Err(format!("tx {:#x} reverted", receipt.transaction_hash));
        }

        Ok(receipt)
    }
}

impl ChainBackend for AlloyChain {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn deploy_contract(&self, init_code: Bytes) -> Result<Deployed, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_deploy_code(init_code);

        let receipt = self
            .send_and_confirm(tx)
            .await
            .map_err(ScriptError::ContractDeployment)?;

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in receipt of tx {:#x}",
                receipt.transaction_hash
            ))
        })?;

        Ok(Deployed {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn has_code(&self, address: Address) -> Result<bool, ScriptError> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(!code.is_empty())
    }

    async fn owner_of(&self, address: Address) -> Result<Address, ScriptError> {
        IOwnable::new(address, self.provider.clone())
            .owner()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn submit(&self, call: &PendingCall) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(call.target)
            .with_input(call.call.calldata());

        let receipt = self
            .send_and_confirm(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(format!("{}: {}", call, e)))?;

        Ok(receipt.transaction_hash)
    }
}

/// Render an RPC error, decoding `Ownable` reverts when the node returns them
fn describe_rpc_error(err: &RpcError<TransportErrorKind>) -> String {
    if let RpcError::ErrorResp(payload) = err {
        if let Some(decoded) = payload.as_decoded_interface_error::<IOwnable::IOwnableErrors>() {
            return format!("reverted with {decoded:?}");
        }
    }

    err.to_string()
}

/// A [`GameReader`] over an alloy provider
#[derive(Clone)]
pub struct AlloyReader {
    /// The provider reads are issued through
    provider: Wallet,
    /// The `GameCharacter` contract
    character: Address,
    /// The `GameItem` contract
    item: Address,
}

impl AlloyReader {
    /// The character contract binding
    fn character(&self) -> IGameCharacter::IGameCharacterInstance<Wallet> {
        IGameCharacter::new(self.character, self.provider.clone())
    }

    /// The item contract binding
    fn item(&self) -> IGameItem::IGameItemInstance<Wallet> {
        IGameItem::new(self.item, self.provider.clone())
    }
}

/// Map a contract read error into a [`ScriptError`]
fn read_err(e: alloy::contract::Error) -> ScriptError {
    ScriptError::ContractInteraction(e.to_string())
}

impl GameReader for AlloyReader {
    async fn character_balance(&self, owner: Address) -> Result<U256, ScriptError> {
        self.character().balanceOf(owner).call().await.map_err(read_err)
    }

    async fn character_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, ScriptError> {
        self.character()
            .tokenOfOwnerByIndex(owner, index)
            .call()
            .await
            .map_err(read_err)
    }

    async fn character_stats(&self, token_id: U256) -> Result<CharacterStats, ScriptError> {
        let stats = self
            .character()
            .characterStats(token_id)
            .call()
            .await
            .map_err(read_err)?;

        Ok(CharacterStats {
            name: stats.name,
            description: stats.description,
            level: stats.level,
            experience: stats.experience,
            class: CharacterClass::try_from(stats.characterClass)?,
            strength: stats.strength,
            dexterity: stats.dexterity,
            intelligence: stats.intelligence,
        })
    }

    async fn character_token_uri(&self, token_id: U256) -> Result<String, ScriptError> {
        self.character().tokenURI(token_id).call().await.map_err(read_err)
    }

    async fn next_item_type_id(&self) -> Result<U256, ScriptError> {
        self.item().nextTokenId().call().await.map_err(read_err)
    }

    async fn item_type(&self, id: U256) -> Result<ItemTypeInfo, ScriptError> {
        let item_type = self.item().itemTypes(id).call().await.map_err(read_err)?;
        Ok(ItemTypeInfo {
            name: item_type.name,
            description: item_type.description,
        })
    }

    async fn item_uri(&self, id: U256) -> Result<String, ScriptError> {
        self.item().uri(id).call().await.map_err(read_err)
    }

    async fn item_balance(&self, owner: Address, id: U256) -> Result<U256, ScriptError> {
        self.item().balanceOf(owner, id).call().await.map_err(read_err)
    }
}
