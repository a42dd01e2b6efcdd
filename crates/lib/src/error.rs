use crate::sanitize_error;
use serde::{Deserialize, Serialize};
use solana_client::client_error::ClientError;
use solana_program::program_error::ProgramError;
use solana_sdk::signature::SignerError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub enum L2Error {
    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("Token operation failed: {0}")]
    TokenOperationError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

pub type L2Result<T> = Result<T, L2Error>;

impl From<ClientError> for L2Error {
    fn from(e: ClientError) -> Self {
        let error_string = e.to_string();
        if error_string.contains("AccountNotFound")
            || error_string.contains("could not find account")
        {
            L2Error::AccountNotFound(sanitize_error!(error_string))
        } else {
            L2Error::RpcError(sanitize_error!(error_string))
        }
    }
}

impl From<SignerError> for L2Error {
    fn from(e: SignerError) -> Self {
        L2Error::SigningError(sanitize_error!(e))
    }
}

impl From<ProgramError> for L2Error {
    fn from(e: ProgramError) -> Self {
        L2Error::TokenOperationError(sanitize_error!(e))
    }
}

impl From<bs58::decode::Error> for L2Error {
    fn from(e: bs58::decode::Error) -> Self {
        L2Error::SerializationError(sanitize_error!(e))
    }
}

impl From<toml::de::Error> for L2Error {
    fn from(e: toml::de::Error) -> Self {
        L2Error::ConfigError(sanitize_error!(e))
    }
}

// borsh reports decode failures as io errors, so io errors land here as well
impl From<std::io::Error> for L2Error {
    fn from(e: std::io::Error) -> Self {
        L2Error::SerializationError(sanitize_error!(e))
    }
}
