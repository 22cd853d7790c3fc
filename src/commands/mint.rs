use anyhow::Result;
use colored::Colorize;

use super::bound_client;
use crate::config::{Config, MINT_COPIES_PAYMENT, MINT_ONE_PAYMENT};
use crate::utils::{test_meta_batch, test_meta_map};

const MINT_ONE_META_SIZE: usize = 4;
const MINT_COPIES_META_SIZE: usize = 10;
const MINT_MANY_META_SIZE: usize = 10;
const MINT_COPIES_COUNT: u32 = 5;

/// Mints a single token to the configured account. An explicit token id is
/// optional; without one the contract generates the id.
pub async fn mint_one(config: &Config, token_id: Option<String>) -> Result<()> {
    let secret_key = config.secret_key()?;
    let recipient = config.public_key()?;
    let client = bound_client(config)?;
    let meta = test_meta_map(MINT_ONE_META_SIZE);
    let deploy_hash = client
        .mint_one(
            &secret_key,
            &recipient,
            token_id,
            meta,
            config.payment(MINT_ONE_PAYMENT),
        )
        .await?;
    println!("Mint One");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}

pub async fn mint_copies(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let recipient = config.public_key()?;
    let client = bound_client(config)?;
    let meta = test_meta_map(MINT_COPIES_META_SIZE);
    let deploy_hash = client
        .mint_copies(
            &secret_key,
            &recipient,
            meta,
            MINT_COPIES_COUNT,
            config.payment(MINT_COPIES_PAYMENT),
        )
        .await?;
    println!("Mint Copies");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}

pub async fn mint_many(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let recipient = config.public_key()?;
    let client = bound_client(config)?;
    let metas = test_meta_batch(MINT_MANY_META_SIZE);
    let deploy_hash = client
        .mint_many(
            &secret_key,
            &recipient,
            metas,
            config.payment(MINT_COPIES_PAYMENT),
        )
        .await?;
    println!("Mint Many");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}
