use anyhow::{Context, Result};
use colored::Colorize;

use crate::cep47::Cep47Client;
use crate::config::{Config, INSTALL_PAYMENT};

pub async fn execute(config: &Config) -> Result<()> {
    let secret_key = config.secret_key()?;
    let wasm = std::fs::read(&config.wasm_path).with_context(|| {
        format!(
            "failed to read session wasm from {}",
            config.wasm_path.display()
        )
    })?;
    let client = Cep47Client::new(config);
    let deploy_hash = client
        .install(
            &secret_key,
            wasm,
            &config.token_name,
            &config.token_symbol,
            config.install_meta(),
            config.payment(INSTALL_PAYMENT),
        )
        .await?;
    println!("Contract Installed");
    println!("... DeployHash: {}", deploy_hash.to_string().green());
    Ok(())
}
