use anyhow::Result;

use crate::cep47::{account_info, contract_data, parse_contract_hash};
use crate::config::Config;

/// Prints the configured account as the node reports it.
pub async fn print_account(config: &Config) -> Result<()> {
    let public_key = config.public_key()?;
    let account = account_info(&config.node_address, public_key).await?;
    println!("{}", serde_json::to_string_pretty(&account)?);
    Ok(())
}

/// Prints the raw stored value under the configured contract hash.
pub async fn get_contract(config: &Config) -> Result<()> {
    let contract_hash = parse_contract_hash(&config.contract_hash)?;
    let data = contract_data(&config.node_address, contract_hash).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
