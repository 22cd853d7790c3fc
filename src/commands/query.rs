use anyhow::{bail, Result};

use super::bound_client;
use crate::cep47::parse_public_key;
use crate::config::Config;

pub async fn name(config: &Config) -> Result<()> {
    let client = bound_client(config)?;
    let value = client.name().await?;
    println!("name {}", value);
    Ok(())
}

pub async fn symbol(config: &Config) -> Result<()> {
    let client = bound_client(config)?;
    let value = client.symbol().await?;
    println!("symbol {}", value);
    Ok(())
}

pub async fn meta(config: &Config) -> Result<()> {
    let client = bound_client(config)?;
    let value = client.meta().await?;
    println!("meta {}", serde_json::to_string(&value)?);
    Ok(())
}

pub async fn is_paused(config: &Config) -> Result<()> {
    let client = bound_client(config)?;
    let value = client.is_paused().await?;
    println!("is_paused {}", value);
    Ok(())
}

pub async fn total_supply(config: &Config) -> Result<()> {
    let client = bound_client(config)?;
    let value = client.total_supply().await?;
    println!("total_supply {}", value);
    Ok(())
}

/// Balance of the given account, or of the configured account when no public
/// key argument is passed.
pub async fn balance_of(config: &Config, arg: Option<String>) -> Result<()> {
    let owner = match arg {
        Some(hex) => parse_public_key(&hex)?,
        None => config.public_key()?,
    };
    let client = bound_client(config)?;
    let balance = client.balance_of(&owner).await?;
    println!("Balance: {}", balance);
    Ok(())
}

pub async fn owner_of(config: &Config, token_id: String) -> Result<()> {
    let client = bound_client(config)?;
    match client.owner_of(&token_id).await? {
        Some(owner) => println!("Owner: {}", owner.to_formatted_string()),
        None => bail!("token {} has no owner", token_id),
    }
    Ok(())
}

pub async fn token_meta(config: &Config, token_id: String) -> Result<()> {
    let client = bound_client(config)?;
    match client.token_meta(&token_id).await? {
        Some(meta) => println!("Token meta: {}", serde_json::to_string_pretty(&meta)?),
        None => bail!("token {} has no metadata", token_id),
    }
    Ok(())
}

pub async fn tokens_of(config: &Config, public_key_hex: String) -> Result<()> {
    let owner = parse_public_key(&public_key_hex)?;
    let client = bound_client(config)?;
    let tokens = client.tokens_of(&owner).await?;
    println!("Tokens: {}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}
