//! Implementations of the game scripts

use std::path::Path;

use alloy::primitives::Address;
use tool_utils::{prompt_for_choice, prompt_for_nonempty, prompt_for_number};
use tracing::{info, warn};

use crate::{
    batch_mint::{batch_mint, default_requests, load_requests},
    chain::{AlloyChain, ChainBackend},
    cli::{BatchMintArgs, CreateItemArgs, DeployArgs, MintCharacterArgs, OwnerArgs},
    config::{whole_tokens, DeployConfig},
    constants::DEFAULT_CHARACTER_STAT,
    errors::ScriptError,
    forms::{CreateItemForm, MintCharacterForm},
    registry::{ArtifactStore, DeploymentsFile, Registry},
    sequencer::run_deployment,
    types::{CharacterClass, GameContract},
    utils::write_json_file,
    views::{list_characters, list_item_types, list_owned_items},
};

/// Map a prompt error into a [`ScriptError`]
fn prompt_err(e: eyre::Report) -> ScriptError {
    ScriptError::InvalidInput(e.to_string())
}

pub async fn deploy(
    args: DeployArgs,
    client: &AlloyChain,
    network: &str,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let config = DeployConfig {
        admin: args.admin,
        network: network.to_string(),
        character_base_uri: args.character_base_uri,
        item_uri: args.item_uri,
        token_initial_supply: whole_tokens(args.token_supply),
    };
    info!(
        "Deploying to network {} (chain id {}) with deployer {} and admin {}",
        network,
        client.chain_id(),
        client.signer_address(),
        config.admin
    );

    let deployments = DeploymentsFile::load(deployments_path)?;
    let mut registry = Registry::new(client, ArtifactStore::new(args.artifacts_dir), deployments);
    let report = run_deployment(&mut registry, &config, &args.tags).await?;

    for step in &report.steps {
        let status = if step.newly_deployed { "deployed" } else { "reused" };
        info!("{}: {} ({})", step.contract, step.record.address, status);
    }

    let pending = report.pending_calls();
    if let Some(path) = args.pending_actions_out {
        write_json_file(&path, &pending)?;
        info!("wrote {} pending call(s) to {}", pending.len(), path.display());
    }

    Ok(())
}

pub async fn batch_mint_items(
    args: BatchMintArgs,
    client: &AlloyChain,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let item = DeploymentsFile::load(deployments_path)?.address_of(GameContract::Item)?;
    let requests = match args.items {
        Some(path) => load_requests(&path)?,
        None => default_requests(),
    };

    info!("Signer address: {}", client.signer_address());
    info!("Connected to GameItem at: {item}");

    let report = batch_mint(client, item, &requests).await;
    if !report.failed.is_empty() {
        warn!("{} of {} mint(s) failed", report.failed.len(), requests.len());
    }

    Ok(())
}

pub async fn create_item(
    args: CreateItemArgs,
    client: &AlloyChain,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let item = DeploymentsFile::load(deployments_path)?.address_of(GameContract::Item)?;

    let form = CreateItemForm {
        name: args.name.map_or_else(|| prompt_for_nonempty("Item name"), Ok).map_err(prompt_err)?,
        description: args
            .description
            .map_or_else(|| prompt_for_nonempty("Item description"), Ok)
            .map_err(prompt_err)?,
        initial_supply: args
            .initial_supply
            .map_or_else(|| prompt_for_number("Initial supply", 0u64).map(|n| n.to_string()), Ok)
            .map_err(prompt_err)?,
    };

    let call = form.submit(item, client.signer_address())?;
    info!("{call}");
    let tx_hash = client.submit(&call).await?;
    info!("Item type created successfully! (tx: {tx_hash:#x})");

    Ok(())
}

pub async fn mint_character(
    args: MintCharacterArgs,
    client: &AlloyChain,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let logic = DeploymentsFile::load(deployments_path)?.address_of(GameContract::Logic)?;

    let class = match args.class {
        Some(class) => class,
        None => {
            let names = CharacterClass::ALL.map(|c| c.to_string());
            let options: Vec<&str> = names.iter().map(String::as_str).collect();
            let index = prompt_for_choice("Choose a class", &options).map_err(prompt_err)?;
            CharacterClass::ALL[index]
        }
    };
    let stat = |value: Option<String>, prompt: &str| {
        value.map_or_else(
            || prompt_for_number(prompt, DEFAULT_CHARACTER_STAT).map(|n| n.to_string()),
            Ok,
        )
    };

    let form = MintCharacterForm {
        name: args
            .name
            .map_or_else(|| prompt_for_nonempty("Character name"), Ok)
            .map_err(prompt_err)?,
        description: args
            .description
            .map_or_else(|| prompt_for_nonempty("Character description"), Ok)
            .map_err(prompt_err)?,
        class,
        strength: stat(args.strength, "Strength").map_err(prompt_err)?,
        dexterity: stat(args.dexterity, "Dexterity").map_err(prompt_err)?,
        intelligence: stat(args.intelligence, "Intelligence").map_err(prompt_err)?,
    };

    let call = form.submit(logic)?;
    info!("{call}");
    let tx_hash = client.submit(&call).await?;
    info!("Character minted successfully! (tx: {tx_hash:#x})");

    Ok(())
}

pub async fn show_characters(
    args: OwnerArgs,
    client: &AlloyChain,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let addresses = DeploymentsFile::load(deployments_path)?.view_addresses()?;
    let owner = args.owner.unwrap_or_else(|| client.signer_address());
    let reader = client.reader(addresses.character, addresses.item);

    let characters = list_characters(&reader, owner).await;
    if characters.is_empty() {
        info!("{owner} has no characters");
    }
    for character in characters {
        let stats = &character.stats;
        info!(
            "#{} {} ({}, level {}, {} xp): STR {} DEX {} INT {}",
            character.token_id,
            character.name,
            stats.class,
            stats.level,
            stats.experience,
            stats.strength,
            stats.dexterity,
            stats.intelligence
        );
        info!("    {}", character.description);
        if let Some(image) = &character.image {
            info!("    image: {image}");
        }
        for attribute in &character.attributes {
            info!("    {}: {}", attribute.trait_type, attribute.value);
        }
    }

    Ok(())
}

pub async fn list_items(client: &AlloyChain, deployments_path: &Path) -> Result<(), ScriptError> {
    let addresses = DeploymentsFile::load(deployments_path)?.view_addresses()?;
    let reader = client.reader(addresses.character, addresses.item);

    let items = list_item_types(&reader).await;
    if items.is_empty() {
        info!("No item types have been created yet");
    }
    for item in items {
        info!("{} (ID: {}): {} [{}]", item.name, item.id, item.description, item.uri);
    }

    Ok(())
}

pub async fn show_owned_items(
    args: OwnerArgs,
    client: &AlloyChain,
    deployments_path: &Path,
) -> Result<(), ScriptError> {
    let addresses = DeploymentsFile::load(deployments_path)?.view_addresses()?;
    let owner: Address = args.owner.unwrap_or_else(|| client.signer_address());
    let reader = client.reader(addresses.character, addresses.item);

    let items = list_owned_items(&reader, owner).await;
    if items.is_empty() {
        info!("{owner} holds no items");
    }
    for item in items {
        info!(
            "{} x{} (ID: {}): {} [{}]",
            item.name, item.balance, item.id, item.description, item.uri
        );
    }

    Ok(())
}
