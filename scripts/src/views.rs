//! Read-only list views over the character and item contracts
//!
//! A view never fails as a whole. An entry whose reads fail is logged and
//! left out of the result.

use alloy::primitives::{Address, U256};
use futures::future::join_all;
use tracing::{error, warn};

use crate::{
    chain::{CharacterStats, GameReader},
    constants::FIRST_ITEM_TYPE_ID,
    metadata::{decode_token_uri, resolve_image_url, Attribute, TokenMetadata},
};

/// A character owned by the viewer
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterView {
    /// The token id
    pub token_id: U256,
    /// The name from the token URI, or the on-chain name
    pub name: String,
    /// The description from the token URI, or the on-chain description
    pub description: String,
    /// The image link, with IPFS links rewritten to the gateway
    pub image: Option<String>,
    /// The display attributes from the token URI
    pub attributes: Vec<Attribute>,
    /// The on-chain stats
    pub stats: CharacterStats,
}

/// An item type registered on the item contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemTypeView {
    /// The item type id
    pub id: U256,
    /// The item type name
    pub name: String,
    /// The item type description
    pub description: String,
    /// The metadata URI
    pub uri: String,
}

/// An item type held by the viewer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedItemView {
    /// The item type id
    pub id: U256,
    /// The item type name
    pub name: String,
    /// The item type description
    pub description: String,
    /// The metadata URI
    pub uri: String,
    /// The number held
    pub balance: U256,
}

/// The characters owned by `owner`
///
/// Token ids are enumerated one index at a time; if that fails the view is
/// empty. The per-token reads then run concurrently.
pub async fn list_characters<R: GameReader>(reader: &R, owner: Address) -> Vec<CharacterView> {
    let balance = match reader.character_balance(owner).await {
        Ok(balance) => balance,
        Err(e) => {
            error!("Error fetching character balance of {owner}: {e}");
            return Vec::new();
        }
    };

    let mut token_ids = Vec::new();
    for index in 0..balance.saturating_to::<u64>() {
        match reader.character_of_owner_by_index(owner, U256::from(index)).await {
            Ok(token_id) => token_ids.push(token_id),
            Err(e) => {
                error!("Error fetching token IDs: {e}");
                return Vec::new();
            }
        }
    }

    join_all(token_ids.into_iter().map(|token_id| fetch_character(reader, token_id)))
        .await
        .into_iter()
        .flatten()
        .collect()
}

/// Fetch one character, `None` if its stats cannot be read
async fn fetch_character<R: GameReader>(reader: &R, token_id: U256) -> Option<CharacterView> {
    let stats = match reader.character_stats(token_id).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!("Error fetching details for token ID {token_id}: {e}");
            return None;
        }
    };

    let metadata = match reader.character_token_uri(token_id).await {
        Ok(uri) => decode_token_uri(&uri).unwrap_or_else(|e| {
            warn!("Error parsing token URI for token ID {token_id}: {e}");
            None
        }),
        Err(e) => {
            warn!("Error fetching token URI for token ID {token_id}: {e}");
            None
        }
    };
    let TokenMetadata {
        name,
        description,
        image,
        attributes,
    } = metadata.unwrap_or_default();

    Some(CharacterView {
        token_id,
        name: name.unwrap_or_else(|| stats.name.clone()),
        description: description.unwrap_or_else(|| stats.description.clone()),
        image: image.as_deref().map(resolve_image_url),
        attributes,
        stats,
    })
}

/// The item type ids created so far, `None` if the id counter cannot be read
async fn item_type_ids<R: GameReader>(reader: &R) -> Option<impl Iterator<Item = U256>> {
    match reader.next_item_type_id().await {
        Ok(next) => Some((FIRST_ITEM_TYPE_ID..next.saturating_to::<u64>()).map(U256::from)),
        Err(e) => {
            error!("Error fetching the next item type id: {e}");
            None
        }
    }
}

/// Every item type, fetched one after another
pub async fn list_item_types<R: GameReader>(reader: &R) -> Vec<ItemTypeView> {
    let Some(ids) = item_type_ids(reader).await else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for id in ids {
        let item_type = match reader.item_type(id).await {
            Ok(item_type) => item_type,
            Err(e) => {
                warn!("Error fetching item type ID {id}: {e}");
                continue;
            }
        };
        match reader.item_uri(id).await {
            Ok(uri) => items.push(ItemTypeView {
                id,
                name: item_type.name,
                description: item_type.description,
                uri,
            }),
            Err(e) => warn!("Error fetching item type ID {id}: {e}"),
        }
    }

    items
}

/// The item types `owner` holds at least one of
pub async fn list_owned_items<R: GameReader>(reader: &R, owner: Address) -> Vec<OwnedItemView> {
    let Some(ids) = item_type_ids(reader).await else {
        return Vec::new();
    };

    join_all(ids.map(|id| fetch_owned_item(reader, owner, id)))
        .await
        .into_iter()
        .flatten()
        .collect()
}

/// Fetch one held item type, `None` if not held or any read fails
async fn fetch_owned_item<R: GameReader>(
    reader: &R,
    owner: Address,
    id: U256,
) -> Option<OwnedItemView> {
    let balance = match reader.item_balance(owner, id).await {
        Ok(balance) => balance,
        Err(e) => {
            warn!("Error fetching balance of item ID {id}: {e}");
            return None;
        }
    };
    if balance.is_zero() {
        return None;
    }

    let item_type = match reader.item_type(id).await {
        Ok(item_type) => item_type,
        Err(e) => {
            warn!("Error fetching item type ID {id}: {e}");
            return None;
        }
    };
    match reader.item_uri(id).await {
        Ok(uri) => Some(OwnedItemView {
            id,
            name: item_type.name,
            description: item_type.description,
            uri,
            balance,
        }),
        Err(e) => {
            warn!("Error fetching item type ID {id}: {e}");
            None
        }
    }
}
