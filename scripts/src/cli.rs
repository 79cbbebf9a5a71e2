//! Definitions of CLI arguments and commands for the game scripts

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand};

use crate::{
    chain::AlloyChain,
    commands::{
        batch_mint_items, create_item, deploy, list_items, mint_character, show_characters,
        show_owned_items,
    },
    constants::{
        ADMIN_ADDRESS, DEFAULT_ARTIFACTS_DIR, DEFAULT_CHARACTER_BASE_URI, DEFAULT_DEPLOYMENTS_DIR,
        DEFAULT_ITEM_URI, DEFAULT_NETWORK, DEFAULT_RPC_URL, DEFAULT_TOKEN_INITIAL_SUPPLY,
    },
    errors::ScriptError,
    registry::DeploymentsFile,
    types::{CharacterClass, GameContract},
};

/// The game scripts' command line
#[derive(Parser)]
#[command(about = "Deploy the game contracts and interact with them")]
pub struct Cli {
    /// Private key of the signing account
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Name of the target network, selects the deployments file
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Directory holding one deployments file per network
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments_dir: PathBuf,

    /// The script to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the game contracts
    Deploy(DeployArgs),
    /// Mint a list of items
    BatchMint(BatchMintArgs),
    /// Create a new item type
    CreateItem(CreateItemArgs),
    /// Mint a new character
    MintCharacter(MintCharacterArgs),
    /// List the characters of an account
    Characters(OwnerArgs),
    /// List every item type
    Items,
    /// List the items of an account
    MyItems(OwnerArgs),
}

impl Command {
    /// Run the command against the deployments of `network`
    pub async fn run(
        self,
        client: AlloyChain,
        network: &str,
        deployments_dir: &Path,
    ) -> Result<(), ScriptError> {
        let deployments_path = DeploymentsFile::path_for_network(deployments_dir, network);
        match self {
            Command::Deploy(args) => deploy(args, &client, network, &deployments_path).await,
            Command::BatchMint(args) => batch_mint_items(args, &client, &deployments_path).await,
            Command::CreateItem(args) => create_item(args, &client, &deployments_path).await,
            Command::MintCharacter(args) => mint_character(args, &client, &deployments_path).await,
            Command::Characters(args) => show_characters(args, &client, &deployments_path).await,
            Command::Items => list_items(&client, &deployments_path).await,
            Command::MyItems(args) => show_owned_items(args, &client, &deployments_path).await,
        }
    }
}

/// Deploy the game contracts, hand them to the administrator and wire them together
///
/// Contracts whose bytecode and constructor arguments are unchanged since the
/// recorded deployment are reused, so an interrupted run can be resumed.
#[derive(Args)]
pub struct DeployArgs {
    /// Only run these deploy steps (and the steps they depend on)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<GameContract>,

    /// Directory holding the compiled `<ContractName>.json` artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// The account that should end up owning every contract
    #[arg(long, env = "ADMIN_ADDRESS", default_value_t = ADMIN_ADDRESS)]
    pub admin: Address,

    /// `GameCharacter` base URI
    #[arg(long, default_value = DEFAULT_CHARACTER_BASE_URI)]
    pub character_base_uri: String,

    /// `GameItem` metadata URI
    #[arg(long, default_value = DEFAULT_ITEM_URI)]
    pub item_uri: String,

    /// Initial `GameToken` supply, in whole tokens
    #[arg(long, default_value_t = DEFAULT_TOKEN_INITIAL_SUPPLY)]
    pub token_supply: u64,

    /// Also write the calls left to the administrator to this JSON file
    #[arg(long)]
    pub pending_actions_out: Option<PathBuf>,
}

/// Mint a list of items from the signer
#[derive(Args)]
pub struct BatchMintArgs {
    /// JSON file with a `[{ "id", "amount", "recipient" }]` list;
    /// the built-in list is minted when omitted
    #[arg(short, long)]
    pub items: Option<PathBuf>,
}

/// Create a new item type, minting its initial supply to the signer.
/// Missing values are prompted for.
#[derive(Args)]
pub struct CreateItemArgs {
    /// Item name
    #[arg(long)]
    pub name: Option<String>,

    /// Item description
    #[arg(long)]
    pub description: Option<String>,

    /// Initial supply
    #[arg(long)]
    pub initial_supply: Option<String>,
}

/// Mint a new character for the signer. Missing values are prompted for.
#[derive(Args)]
pub struct MintCharacterArgs {
    /// Character name
    #[arg(long)]
    pub name: Option<String>,

    /// Character description
    #[arg(long)]
    pub description: Option<String>,

    /// Character class
    #[arg(long, value_enum)]
    pub class: Option<CharacterClass>,

    /// Strength stat
    #[arg(long)]
    pub strength: Option<String>,

    /// Dexterity stat
    #[arg(long)]
    pub dexterity: Option<String>,

    /// Intelligence stat
    #[arg(long)]
    pub intelligence: Option<String>,
}

/// List the tokens held by an account
#[derive(Args)]
pub struct OwnerArgs {
    /// The account to list, the signer if omitted
    #[arg(short, long)]
    pub owner: Option<Address>,
}
