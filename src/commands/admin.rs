use anyhow::Result;
use colored::Colorize;

use super::bound_client;
use crate::config::{Config, MINT_ONE_PAYMENT};
use crate::utils::test_meta_map;

const UPDATE_META_SIZE: usize = 4;

pub async fn pause(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let client = bound_client(config)?;
    let deploy_hash = client
        .pause(&secret_key, config.payment(MINT_ONE_PAYMENT))
        .await?;
    println!("Pause");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}

pub async fn unpause(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let client = bound_client(config)?;
    let deploy_hash = client
        .unpause(&secret_key, config.payment(MINT_ONE_PAYMENT))
        .await?;
    println!("Unpause");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}

/// Replaces a token's metadata with fresh placeholder entries.
pub async fn update_token_metadata(config: &Config, token_id: String) -> Result<()> {
    let secret_key = config.secret_key()?;
    let client = bound_client(config)?;
    let meta = test_meta_map(UPDATE_META_SIZE);
    let deploy_hash = client
        .update_token_metadata(
            &secret_key,
            token_id,
            meta,
            config.payment(MINT_ONE_PAYMENT),
        )
        .await?;
    println!("Update Token Metadata");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}
