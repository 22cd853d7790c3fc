use anyhow::Result;
use colored::Colorize;

use super::bound_client;
use crate::config::{Config, TRANSFER_PAYMENT};

/// Transfers one token from the configured account to the configured
/// recipient.
pub async fn transfer_token(config: &Config, token_id: String) -> Result<()> {
    let secret_key = config.secret_key()?;
    let sender = config.public_key()?;
    let client = bound_client(config)?;
    let deploy_hash = client
        .transfer_token(
            &secret_key,
            &sender,
            &config.recipient,
            token_id,
            config.payment(TRANSFER_PAYMENT),
        )
        .await?;
    println!("Transfer Token");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}

/// Moves every token the configured account owns to the configured recipient.
pub async fn transfer_all(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let sender = config.public_key()?;
    let client = bound_client(config)?;
    let deploy_hash = client
        .transfer_all(
            &secret_key,
            &sender,
            &config.recipient,
            config.payment(TRANSFER_PAYMENT),
        )
        .await?;
    println!("Transfer All Tokens");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}
