use std::path::PathBuf;

use anyhow::{anyhow, Result};
use casper_types::{AsymmetricType, PublicKey, SecretKey, U512};
use clap::Args;

use crate::cep47::Meta;

/// Default payment amounts in motes, per operation kind.
pub const INSTALL_PAYMENT: u64 = 200_000_000_000;
pub const MINT_ONE_PAYMENT: u64 = 2_000_000_000;
pub const MINT_COPIES_PAYMENT: u64 = 100_000_000_000;
pub const BURN_ONE_PAYMENT: u64 = 12_000_000_000;
pub const TRANSFER_PAYMENT: u64 = 200_000_000_000;

/// Network and contract options shared by every command.
#[derive(Args, Debug)]
pub struct ConfigOpts {
    /// JSON-RPC endpoint of the Casper node
    #[arg(long, default_value = "http://localhost:40101/rpc")]
    pub node_address: String,

    /// SSE endpoint emitting chain events
    #[arg(long, default_value = "http://localhost:60101/events")]
    pub events_address: String,

    /// Chain name of the target network
    #[arg(long, default_value = "casper-net-1")]
    pub chain_name: String,

    /// Hash of the installed CEP-47 contract, hex with or without a `hash-` prefix
    #[arg(
        long,
        default_value = "cd02755c7e42c3f191f005d2e3a42324488056be0361935bdbcb6b4722dab14b"
    )]
    pub contract_hash: String,

    /// Directory holding public_key.pem and secret_key.pem
    #[arg(long, default_value = "./keys")]
    pub keys: PathBuf,

    /// Session wasm installed by install_contract
    #[arg(
        long,
        default_value = "./../target/wasm32-unknown-unknown/release/dragons-nft.wasm"
    )]
    pub wasm: PathBuf,

    /// Recipient public key hex used by the transfer commands
    #[arg(
        long,
        default_value = "017b4822b849f197acf4f49d91315887f913128a9673a2d7ea834cf13c2e6fc606"
    )]
    pub recipient: String,

    /// Payment amount in motes, overriding the per-command default
    #[arg(long)]
    pub payment: Option<u64>,

    /// Collection name passed to install_contract
    #[arg(long, default_value = "event_nft_3")]
    pub token_name: String,

    /// Collection symbol passed to install_contract
    #[arg(long, default_value = "DRAG")]
    pub token_symbol: String,
}

/// Per-invocation configuration, built once in `main` and passed into the
/// action functions.
#[derive(Debug)]
pub struct Config {
    pub node_address: String,
    pub events_address: String,
    pub chain_name: String,
    pub contract_hash: String,
    pub keys_path: PathBuf,
    pub wasm_path: PathBuf,
    pub recipient: PublicKey,
    pub token_name: String,
    pub token_symbol: String,
    payment_override: Option<u64>,
}

impl Config {
    pub fn new(opts: ConfigOpts) -> Result<Config> {
        let recipient = PublicKey::from_hex(&opts.recipient)
            .map_err(|err| anyhow!("invalid recipient public key `{}`: {}", opts.recipient, err))?;
        Ok(Config {
            node_address: opts.node_address,
            events_address: opts.events_address,
            chain_name: opts.chain_name,
            contract_hash: opts.contract_hash,
            keys_path: opts.keys,
            wasm_path: opts.wasm,
            recipient,
            token_name: opts.token_name,
            token_symbol: opts.token_symbol,
            payment_override: opts.payment,
        })
    }

    /// The signing key for deploys, read from `<keys>/secret_key.pem`.
    pub fn secret_key(&self) -> Result<SecretKey> {
        let path = self.keys_path.join("secret_key.pem");
        SecretKey::from_file(&path)
            .map_err(|err| anyhow!("failed to read secret key from {}: {}", path.display(), err))
    }

    /// The account key, read from `<keys>/public_key.pem`.
    pub fn public_key(&self) -> Result<PublicKey> {
        let path = self.keys_path.join("public_key.pem");
        PublicKey::from_file(&path)
            .map_err(|err| anyhow!("failed to read public key from {}: {}", path.display(), err))
    }

    /// Payment for one operation: the `--payment` override if given, else the
    /// operation's default.
    pub fn payment(&self, default_motes: u64) -> U512 {
        U512::from(self.payment_override.unwrap_or(default_motes))
    }

    /// Collection-level metadata sent on install.
    pub fn install_meta(&self) -> Meta {
        [("origin", "fire"), ("lifetime", "infinite")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ConfigOpts {
        ConfigOpts {
            node_address: "http://localhost:40101/rpc".to_string(),
            events_address: "http://localhost:60101/events".to_string(),
            chain_name: "casper-net-1".to_string(),
            contract_hash: "cd02755c7e42c3f191f005d2e3a42324488056be0361935bdbcb6b4722dab14b"
                .to_string(),
            keys: PathBuf::from("./keys"),
            wasm: PathBuf::from("./contract.wasm"),
            recipient: "017b4822b849f197acf4f49d91315887f913128a9673a2d7ea834cf13c2e6fc606"
                .to_string(),
            payment: None,
            token_name: "event_nft_3".to_string(),
            token_symbol: "DRAG".to_string(),
        }
    }

    #[test]
    fn builds_from_valid_opts() {
        let config = Config::new(opts()).expect("valid opts");
        assert_eq!(config.chain_name, "casper-net-1");
        assert_eq!(config.payment(MINT_ONE_PAYMENT), U512::from(2_000_000_000u64));
    }

    #[test]
    fn payment_override_wins() {
        let mut opts = opts();
        opts.payment = Some(42);
        let config = Config::new(opts).expect("valid opts");
        assert_eq!(config.payment(INSTALL_PAYMENT), U512::from(42u64));
    }

    #[test]
    fn rejects_bad_recipient() {
        let mut opts = opts();
        opts.recipient = "not-a-key".to_string();
        assert!(Config::new(opts).is_err());
    }

    #[test]
    fn install_meta_is_fixed() {
        let config = Config::new(opts()).expect("valid opts");
        let meta = config.install_meta();
        assert_eq!(meta.get("origin").map(String::as_str), Some("fire"));
        assert_eq!(meta.get("lifetime").map(String::as_str), Some("infinite"));
    }
}
