mod account;
mod admin;
mod burn;
mod install;
mod listen;
mod mint;
mod query;
mod transfer;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::cep47::Cep47Client;
use crate::config::{Config, ConfigOpts};

#[derive(Parser, Debug)]
#[command(name = "cep47-cli", about = "Command-line client for CEP-47 NFT contracts", version)]
pub struct Cli {
    /// Command to run, e.g. mint_one or total_supply
    pub command: String,

    /// Command argument: a token id or a public key hex
    pub arg: Option<String>,

    #[command(flatten)]
    pub opts: ConfigOpts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    InstallContract,
    MintOne,
    MintCopies,
    MintMany,
    Name,
    Symbol,
    Meta,
    IsPaused,
    BurnOne,
    TotalSupply,
    BalanceOf,
    OwnerOf,
    GetTokenMeta,
    TokensOf,
    UpdateTokenMetadata,
    Pause,
    Unpause,
    PrintAccount,
    GetContract,
    TransferToken,
    TransferAll,
    ListenTo,
}

pub const COMMANDS: &[(&str, Command)] = &[
    ("install_contract", Command::InstallContract),
    ("mint_one", Command::MintOne),
    ("mint_copies", Command::MintCopies),
    ("mint_many", Command::MintMany),
    ("name", Command::Name),
    ("symbol", Command::Symbol),
    ("meta", Command::Meta),
    ("is_paused", Command::IsPaused),
    ("burn_one", Command::BurnOne),
    ("total_supply", Command::TotalSupply),
    ("balance_of", Command::BalanceOf),
    ("owner_of", Command::OwnerOf),
    ("get_token_meta", Command::GetTokenMeta),
    ("tokens_of", Command::TokensOf),
    ("update_token_metadata", Command::UpdateTokenMetadata),
    ("pause", Command::Pause),
    ("unpause", Command::Unpause),
    ("print_account", Command::PrintAccount),
    ("get_contract", Command::GetContract),
    ("transfer_token", Command::TransferToken),
    ("transfer_all", Command::TransferAll),
    ("listen_to", Command::ListenTo),
];

impl Command {
    pub fn from_name(name: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, command)| *command)
    }
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let command = match Command::from_name(&cli.command) {
        Some(command) => command,
        None => {
            println!("Command unknown {}", cli.command);
            return Ok(());
        }
    };
    let config = Config::new(cli.opts)?;
    let config = &config;
    let arg = cli.arg;
    match command {
        Command::InstallContract => install::execute(config).await,
        Command::MintOne => mint::mint_one(config, arg).await,
        Command::MintCopies => mint::mint_copies(config).await,
        Command::MintMany => mint::mint_many(config).await,
        Command::Name => query::name(config).await,
        Command::Symbol => query::symbol(config).await,
        Command::Meta => query::meta(config).await,
        Command::IsPaused => query::is_paused(config).await,
        Command::BurnOne => burn::execute(config, require_arg(arg, "token id")?).await,
        Command::TotalSupply => query::total_supply(config).await,
        Command::BalanceOf => query::balance_of(config, arg).await,
        Command::OwnerOf => query::owner_of(config, require_arg(arg, "token id")?).await,
        Command::GetTokenMeta => query::token_meta(config, require_arg(arg, "token id")?).await,
        Command::TokensOf => query::tokens_of(config, require_arg(arg, "public key hex")?).await,
        Command::UpdateTokenMetadata => {
            admin::update_token_metadata(config, require_arg(arg, "token id")?).await
        }
        Command::Pause => admin::pause(config).await,
        Command::Unpause => admin::unpause(config).await,
        Command::PrintAccount => account::print_account(config).await,
        Command::GetContract => account::get_contract(config).await,
        Command::TransferToken => {
            transfer::transfer_token(config, require_arg(arg, "token id")?).await
        }
        Command::TransferAll => transfer::transfer_all(config).await,
        Command::ListenTo => listen::execute(config).await,
    }
}

/// Client bound to the configured contract hash, as every command but
/// install/print_account needs.
fn bound_client(config: &Config) -> Result<Cep47Client> {
    let mut client = Cep47Client::new(config);
    client.set_contract_hash(&config.contract_hash)?;
    Ok(client)
}

fn require_arg(arg: Option<String>, what: &str) -> Result<String> {
    arg.ok_or_else(|| anyhow!("missing required argument: {}", what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_resolves_to_its_command() {
        for (name, command) in COMMANDS {
            assert_eq!(Command::from_name(name), Some(*command));
        }
    }

    #[test]
    fn registry_covers_the_full_command_set() {
        let expected = [
            "install_contract",
            "mint_one",
            "mint_copies",
            "mint_many",
            "name",
            "symbol",
            "meta",
            "is_paused",
            "burn_one",
            "total_supply",
            "balance_of",
            "owner_of",
            "get_token_meta",
            "tokens_of",
            "update_token_metadata",
            "pause",
            "unpause",
            "print_account",
            "get_contract",
            "transfer_token",
            "transfer_all",
            "listen_to",
        ];
        assert_eq!(COMMANDS.len(), expected.len());
        for name in expected {
            assert!(
                Command::from_name(name).is_some(),
                "missing command {}",
                name
            );
        }
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert_eq!(Command::from_name("mint_all"), None);
        assert_eq!(Command::from_name("MINT_ONE"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn cli_parses_command_and_argument() {
        let cli = Cli::try_parse_from(["cep47-cli", "burn_one", "17873237509455618405"])
            .expect("valid invocation");
        assert_eq!(cli.command, "burn_one");
        assert_eq!(cli.arg.as_deref(), Some("17873237509455618405"));
        assert_eq!(cli.opts.chain_name, "casper-net-1");
    }

    #[test]
    fn cli_accepts_configuration_overrides() {
        let cli = Cli::try_parse_from([
            "cep47-cli",
            "total_supply",
            "--node-address",
            "http://node:7777/rpc",
            "--payment",
            "5000000000",
        ])
        .expect("valid invocation");
        assert_eq!(cli.arg, None);
        assert_eq!(cli.opts.node_address, "http://node:7777/rpc");
        assert_eq!(cli.opts.payment, Some(5_000_000_000));
    }

    #[test]
    fn missing_argument_is_an_error() {
        assert!(require_arg(None, "token id").is_err());
        assert_eq!(
            require_arg(Some("id".to_string()), "token id").expect("present"),
            "id"
        );
    }
}
