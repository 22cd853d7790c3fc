//! Thin client for a CEP-47 contract: every method builds one set of runtime
//! args and performs exactly one `casper-client` call, either a signed deploy
//! of a stored-contract entry point or a global-state query.

use std::collections::BTreeMap;

use casper_client::{
    get_account, get_dictionary_item, get_state_root_hash, put_deploy, query_global_state,
    rpcs::{DictionaryItemIdentifier, GlobalStateIdentifier},
    types::{Account, DeployBuilder, DeployHash, ExecutableDeployItem, StoredValue, TimeDiff,
        Timestamp},
    JsonRpcId, Verbosity,
};
use casper_hashing::Digest;
use casper_types::{
    bytesrepr::{Bytes, FromBytes, ToBytes},
    runtime_args, AsymmetricType, CLTyped, ContractHash, Key, PublicKey, RuntimeArgs, SecretKey,
    U256, U512,
};
use log::debug;
use rand::Rng;

use crate::config::Config;
use crate::error::{Error, Result};

pub type TokenId = String;
pub type Meta = BTreeMap<String, String>;

const BALANCES_DICT: &str = "balances";
const OWNERS_DICT: &str = "owners";
const METADATA_DICT: &str = "metadata";
const OWNED_TOKENS_BY_INDEX_DICT: &str = "owned_tokens_by_index";

const DEPLOY_TTL_SECS: u32 = 30 * 60;

pub struct Cep47Client {
    node_address: String,
    chain_name: String,
    contract_hash: Option<ContractHash>,
}

impl Cep47Client {
    pub fn new(config: &Config) -> Cep47Client {
        Cep47Client {
            node_address: config.node_address.clone(),
            chain_name: config.chain_name.clone(),
            contract_hash: None,
        }
    }

    /// Binds the client to an installed contract. Required for everything
    /// except `install`.
    pub fn set_contract_hash(&mut self, raw: &str) -> Result<()> {
        self.contract_hash = Some(parse_contract_hash(raw)?);
        Ok(())
    }

    fn contract_hash(&self) -> Result<ContractHash> {
        self.contract_hash.ok_or(Error::ContractHashNotSet)
    }

    // Mutations. Each submits one signed deploy and returns its hash.

    pub async fn install(
        &self,
        secret_key: &SecretKey,
        wasm: Vec<u8>,
        token_name: &str,
        token_symbol: &str,
        token_meta: Meta,
        payment: U512,
    ) -> Result<DeployHash> {
        let session = ExecutableDeployItem::ModuleBytes {
            module_bytes: Bytes::from(wasm),
            args: runtime_args! {
                "token_name" => token_name.to_string(),
                "token_symbol" => token_symbol.to_string(),
                "token_meta" => token_meta,
            },
        };
        self.submit(secret_key, session, payment).await
    }

    pub async fn mint_one(
        &self,
        secret_key: &SecretKey,
        recipient: &PublicKey,
        token_id: Option<TokenId>,
        token_meta: Meta,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "recipient" => account_key(recipient),
            "token_ids" => token_id,
            "token_meta" => token_meta,
        };
        self.call_entry_point(secret_key, "mint_one", args, payment)
            .await
    }

    pub async fn mint_copies(
        &self,
        secret_key: &SecretKey,
        recipient: &PublicKey,
        token_meta: Meta,
        count: u32,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "recipient" => account_key(recipient),
            "token_ids" => Option::<Vec<TokenId>>::None,
            "token_meta" => token_meta,
            "count" => count,
        };
        self.call_entry_point(secret_key, "mint_copies", args, payment)
            .await
    }

    pub async fn mint_many(
        &self,
        secret_key: &SecretKey,
        recipient: &PublicKey,
        token_metas: Vec<Meta>,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "recipient" => account_key(recipient),
            "token_ids" => Option::<Vec<TokenId>>::None,
            "token_metas" => token_metas,
        };
        self.call_entry_point(secret_key, "mint_many", args, payment)
            .await
    }

    pub async fn burn_one(
        &self,
        secret_key: &SecretKey,
        owner: &PublicKey,
        token_id: TokenId,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "owner" => account_key(owner),
            "token_id" => token_id,
        };
        self.call_entry_point(secret_key, "burn_one", args, payment)
            .await
    }

    pub async fn transfer_token(
        &self,
        secret_key: &SecretKey,
        sender: &PublicKey,
        recipient: &PublicKey,
        token_id: TokenId,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "sender" => account_key(sender),
            "recipient" => account_key(recipient),
            "token_id" => token_id,
        };
        self.call_entry_point(secret_key, "transfer_token", args, payment)
            .await
    }

    pub async fn transfer_all(
        &self,
        secret_key: &SecretKey,
        sender: &PublicKey,
        recipient: &PublicKey,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "sender" => account_key(sender),
            "recipient" => account_key(recipient),
        };
        self.call_entry_point(secret_key, "transfer_all_tokens", args, payment)
            .await
    }

    pub async fn update_token_metadata(
        &self,
        secret_key: &SecretKey,
        token_id: TokenId,
        token_meta: Meta,
        payment: U512,
    ) -> Result<DeployHash> {
        let args = runtime_args! {
            "token_id" => token_id,
            "meta" => token_meta,
        };
        self.call_entry_point(secret_key, "update_token_metadata", args, payment)
            .await
    }

    pub async fn pause(&self, secret_key: &SecretKey, payment: U512) -> Result<DeployHash> {
        self.call_entry_point(secret_key, "pause", RuntimeArgs::new(), payment)
            .await
    }

    pub async fn unpause(&self, secret_key: &SecretKey, payment: U512) -> Result<DeployHash> {
        self.call_entry_point(secret_key, "unpause", RuntimeArgs::new(), payment)
            .await
    }

    // Queries against the contract's named keys and dictionaries.

    pub async fn name(&self) -> Result<String> {
        self.query_named("name").await
    }

    pub async fn symbol(&self) -> Result<String> {
        self.query_named("symbol").await
    }

    pub async fn meta(&self) -> Result<Meta> {
        self.query_named("meta").await
    }

    pub async fn total_supply(&self) -> Result<U256> {
        self.query_named("total_supply").await
    }

    pub async fn is_paused(&self) -> Result<bool> {
        self.query_named("is_paused").await
    }

    /// Balance of `owner`; a missing dictionary entry means zero.
    pub async fn balance_of(&self, owner: &PublicKey) -> Result<U256> {
        let balance = self
            .query_dictionary(BALANCES_DICT, &account_item_key(owner))
            .await?;
        Ok(balance.unwrap_or_default())
    }

    pub async fn owner_of(&self, token_id: &str) -> Result<Option<Key>> {
        self.query_dictionary(OWNERS_DICT, token_id).await
    }

    pub async fn token_meta(&self, token_id: &str) -> Result<Option<Meta>> {
        self.query_dictionary(METADATA_DICT, token_id).await
    }

    /// All token ids owned by `owner`, walked through the index dictionary.
    pub async fn tokens_of(&self, owner: &PublicKey) -> Result<Vec<TokenId>> {
        let owner_key = account_key(owner);
        let balance = self.balance_of(owner).await?;
        let mut tokens = Vec::new();
        let mut index = U256::zero();
        while index < balance {
            let item_key = indexed_item_key(&owner_key, &index)?;
            match self
                .query_dictionary::<TokenId>(OWNED_TOKENS_BY_INDEX_DICT, &item_key)
                .await?
            {
                Some(token_id) => tokens.push(token_id),
                None => break,
            }
            index = index + U256::one();
        }
        Ok(tokens)
    }

    async fn call_entry_point(
        &self,
        secret_key: &SecretKey,
        entry_point: &str,
        args: RuntimeArgs,
        payment: U512,
    ) -> Result<DeployHash> {
        let session = ExecutableDeployItem::StoredContractByHash {
            hash: self.contract_hash()?,
            entry_point: entry_point.to_string(),
            args,
        };
        self.submit(secret_key, session, payment).await
    }

    async fn submit(
        &self,
        secret_key: &SecretKey,
        session: ExecutableDeployItem,
        payment: U512,
    ) -> Result<DeployHash> {
        let deploy = DeployBuilder::new(self.chain_name.as_str(), session, secret_key)
            .with_standard_payment(payment)
            .with_timestamp(Timestamp::now())
            .with_ttl(TimeDiff::from_millis(DEPLOY_TTL_SECS as u64 * 1000))
            .build()?;
        debug!("submitting deploy to {}", self.node_address);
        let response = put_deploy(rpc_id(), &self.node_address, Verbosity::Low, deploy).await?;
        Ok(response.result.deploy_hash)
    }

    async fn state_root_hash(&self) -> Result<Digest> {
        let response =
            get_state_root_hash(rpc_id(), &self.node_address, Verbosity::Low, None).await?;
        response
            .result
            .state_root_hash
            .ok_or(Error::MissingStateRootHash)
    }

    async fn query_named<T: CLTyped + FromBytes>(&self, name: &str) -> Result<T> {
        let state_root_hash = self.state_root_hash().await?;
        debug!("querying `{}` under {}", name, self.node_address);
        let response = query_global_state(
            rpc_id(),
            &self.node_address,
            Verbosity::Low,
            GlobalStateIdentifier::StateRootHash(state_root_hash),
            Key::Hash(self.contract_hash()?.value()),
            vec![name.to_string()],
        )
        .await?;
        cl_value(name, response.result.stored_value)
    }

    async fn query_dictionary<T: CLTyped + FromBytes>(
        &self,
        dictionary: &str,
        item_key: &str,
    ) -> Result<Option<T>> {
        let state_root_hash = self.state_root_hash().await?;
        let identifier = DictionaryItemIdentifier::ContractNamedKey {
            key: self.contract_hash()?.to_formatted_string(),
            dictionary_name: dictionary.to_string(),
            dictionary_item_key: item_key.to_string(),
        };
        debug!("querying dictionary `{}` item `{}`", dictionary, item_key);
        let result = get_dictionary_item(
            rpc_id(),
            &self.node_address,
            Verbosity::Low,
            state_root_hash,
            identifier,
        )
        .await;
        match result {
            Ok(response) => {
                let path = format!("{}/{}", dictionary, item_key);
                cl_value(&path, response.result.stored_value).map(Some)
            }
            Err(err) if is_value_not_found(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Account info for `public_key`, as the node reports it.
pub async fn account_info(node_address: &str, public_key: PublicKey) -> Result<Account> {
    let response = get_account(rpc_id(), node_address, Verbosity::Low, None, public_key).await?;
    Ok(response.result.account)
}

/// The raw stored value under the contract hash.
pub async fn contract_data(node_address: &str, contract_hash: ContractHash) -> Result<StoredValue> {
    let response = get_state_root_hash(rpc_id(), node_address, Verbosity::Low, None).await?;
    let state_root_hash = response
        .result
        .state_root_hash
        .ok_or(Error::MissingStateRootHash)?;
    let response = query_global_state(
        rpc_id(),
        node_address,
        Verbosity::Low,
        GlobalStateIdentifier::StateRootHash(state_root_hash),
        Key::Hash(contract_hash.value()),
        Vec::new(),
    )
    .await?;
    Ok(response.result.stored_value)
}

pub fn parse_contract_hash(raw: &str) -> Result<ContractHash> {
    let stripped = raw.strip_prefix("hash-").unwrap_or(raw);
    let bytes =
        hex::decode(stripped).map_err(|_| Error::InvalidContractHash(raw.to_string()))?;
    let hash = <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| Error::InvalidContractHash(raw.to_string()))?;
    Ok(ContractHash::new(hash))
}

pub fn parse_public_key(raw: &str) -> Result<PublicKey> {
    PublicKey::from_hex(raw)
        .map_err(|err| Error::InvalidPublicKey(raw.to_string(), err.to_string()))
}

fn account_key(public_key: &PublicKey) -> Key {
    Key::Account(public_key.to_account_hash())
}

/// Item key for the account-keyed dictionaries: lowercase hex of the account
/// hash, as the contract's `key_to_str` writes it.
fn account_item_key(owner: &PublicKey) -> String {
    hex::encode(owner.to_account_hash().value())
}

/// Item key for `owned_tokens_by_index`: blake2b over the owner `Key` bytes
/// followed by the `U256` index bytes, hex encoded.
fn indexed_item_key(owner: &Key, index: &U256) -> Result<String> {
    let mut bytes = owner.to_bytes().map_err(Error::Bytesrepr)?;
    bytes.extend(index.to_bytes().map_err(Error::Bytesrepr)?);
    Ok(hex::encode(Digest::hash(&bytes).value()))
}

fn cl_value<T: CLTyped + FromBytes>(path: &str, stored: StoredValue) -> Result<T> {
    match stored {
        StoredValue::CLValue(value) => value.into_t().map_err(|source| Error::InvalidCLValue {
            path: path.to_string(),
            cause: source,
        }),
        _ => Err(Error::UnexpectedStoredValue {
            path: path.to_string(),
        }),
    }
}

// state_get_dictionary_item reports a missing entry as a query-failed rpc
// error whose message carries "ValueNotFound".
fn is_value_not_found(err: &casper_client::Error) -> bool {
    err.to_string().contains("ValueNotFound")
}

fn rpc_id() -> JsonRpcId {
    JsonRpcId::Number(rand::thread_rng().gen())
}
