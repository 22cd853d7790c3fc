use anyhow::Result;
use colored::Colorize;

use super::bound_client;
use crate::config::{Config, BURN_ONE_PAYMENT};

/// Burns one of the configured account's tokens.
pub async fn execute(config: &Config, token_id: String) -> Result<()> {
    let secret_key = config.secret_key()?;
    let owner = config.public_key()?;
    let client = bound_client(config)?;
    let deploy_hash = client
        .burn_one(
            &secret_key,
            &owner,
            token_id,
            config.payment(BURN_ONE_PAYMENT),
        )
        .await?;
    println!("Burn One");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}
