//! Constants used in the deploy and client scripts

use alloy::primitives::{address, Address};

/// The account intended to own every deployed game contract
///
/// This is the single source of truth for the administrator; it can be
/// overridden at runtime with `--admin` or the `ADMIN_ADDRESS` env var.
pub const ADMIN_ADDRESS: Address = address!("0xBe1bC6a126Ae4176Af8a1d0Fa77bf59Ba476B48A");

/// The base URI passed to the `GameCharacter` constructor
pub const DEFAULT_CHARACTER_BASE_URI: &str = "https://yourgame.com/images/characters/";

/// The metadata URI passed to the `GameItem` constructor
///
/// ERC1155 clients substitute `{id}` with the hex-padded token id.
pub const DEFAULT_ITEM_URI: &str = "https://api.yourgame.com/items/{id}.json";

/// The initial `GameToken` supply, in whole tokens
pub const DEFAULT_TOKEN_INITIAL_SUPPLY: u64 = 1_000_000;

/// The number of decimals of the `GameToken`
pub const GAME_TOKEN_DECIMALS: u8 = 18;

/// The deployment name of the character contract
pub const GAME_CHARACTER_NAME: &str = "GameCharacter";

/// The deployment name of the item contract
pub const GAME_ITEM_NAME: &str = "GameItem";

/// The deployment name of the fungible token contract
pub const GAME_TOKEN_NAME: &str = "GameToken";

/// The deployment name of the game logic contract
pub const GAME_LOGIC_NAME: &str = "GameLogic";

/// The directory holding one deployments file per network
pub const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";

/// The directory holding compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of deployments and artifact files
pub const JSON_EXTENSION: &str = "json";

/// The default network name
pub const DEFAULT_NETWORK: &str = "localhost";

/// The default RPC url, a local Anvil / Hardhat node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The prefix of a token URI that embeds its metadata document
pub const JSON_DATA_URI_PREFIX: &str = "data:application/json;base64,";

/// The scheme of IPFS image links
pub const IPFS_SCHEME: &str = "ipfs://";

/// The HTTP gateway IPFS image links are rewritten to
pub const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// The first id handed out by `GameItem.createItemType`
pub const FIRST_ITEM_TYPE_ID: u64 = 1;

/// The default value of each character stat in the mint form
pub const DEFAULT_CHARACTER_STAT: u64 = 10;

/// The items minted by `batch-mint` when no list is given
///
/// Each entry is `(item id, amount, recipient)`; an empty recipient mints
/// to the signer.
pub const DEFAULT_BATCH_MINT: [(u64, u64, &str); 2] = [(1, 10, ""), (2, 5, "")];
