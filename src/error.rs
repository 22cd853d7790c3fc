use thiserror::Error;

/// Failures raised by the contract client and the event stream.
#[derive(Debug, Error)]
pub enum Error {
    #[error("contract hash is not set")]
    ContractHashNotSet,

    #[error("invalid contract hash `{0}`")]
    InvalidContractHash(String),

    #[error("invalid public key `{0}`: {1}")]
    InvalidPublicKey(String, String),

    #[error("rpc request failed: {0}")]
    Rpc(#[from] casper_client::Error),

    #[error("building deploy failed: {0}")]
    DeployBuild(casper_client::Error),

    #[error("node returned no state root hash")]
    MissingStateRootHash,

    #[error("value under `{path}` is not a CLValue")]
    UnexpectedStoredValue { path: String },

    #[error("decoding value under `{path}` failed: {cause:?}")]
    InvalidCLValue {
        path: String,
        cause: casper_types::CLValueError,
    },

    #[error("serializing runtime value failed: {0:?}")]
    Bytesrepr(casper_types::bytesrepr::Error),

    #[error("event stream request failed: {0}")]
    EventStream(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
