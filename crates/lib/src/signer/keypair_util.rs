use crate::{error::L2Error, sanitize_error};
use solana_sdk::signature::Keypair;
use std::fs;

/// Utility functions for parsing private keys in multiple formats
pub struct KeypairUtil;

impl KeypairUtil {
    /// Creates a keypair from a private key string that can be in multiple formats:
    /// - File path to a JSON keypair file (as written by `solana-keygen`)
    /// - U8Array format: "[0, 1, 2, ...]"
    /// - Base58 encoded string
    pub fn from_private_key_string(private_key: &str) -> Result<Keypair, L2Error> {
        if let Ok(file_content) = fs::read_to_string(private_key) {
            return Self::from_json_keypair(&file_content);
        }

        let trimmed = private_key.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            return Self::from_u8_array_string(trimmed);
        }

        Self::from_base58_safe(trimmed)
    }

    /// Reads a private key from an environment variable, honouring `.env`.
    pub fn from_env(var: &str) -> Result<Keypair, L2Error> {
        dotenv::dotenv().ok();
        let value = std::env::var(var)
            .map_err(|_| L2Error::ConfigError(format!("{var} environment variable is not set")))?;
        Self::from_private_key_string(&value)
    }

    pub fn from_base58_safe(private_key: &str) -> Result<Keypair, L2Error> {
        let decoded = bs58::decode(private_key).into_vec().map_err(|e| {
            L2Error::SigningError(format!("Invalid base58 string: {}", sanitize_error!(e)))
        })?;

        Self::from_bytes(&decoded)
    }

    pub fn from_u8_array_string(array_str: &str) -> Result<Keypair, L2Error> {
        let inner = array_str
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| {
                L2Error::SigningError(
                    "U8Array string must start with '[' and end with ']'".to_string(),
                )
            })?;

        if inner.trim().is_empty() {
            return Err(L2Error::SigningError("U8Array string cannot be empty".to_string()));
        }

        let bytes = inner
            .split(',')
            .map(|s| s.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| {
                L2Error::SigningError(format!("Failed to parse U8Array: {}", sanitize_error!(e)))
            })?;

        Self::from_bytes(&bytes)
    }

    pub fn from_json_keypair(json_content: &str) -> Result<Keypair, L2Error> {
        let bytes = serde_json::from_str::<Vec<u8>>(json_content).map_err(|_| {
            L2Error::SigningError(
                "Invalid JSON keypair format. Expected a JSON array of 64 bytes".to_string(),
            )
        })?;

        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Keypair, L2Error> {
        if bytes.len() != 64 {
            return Err(L2Error::SigningError(format!(
                "Private key must be exactly 64 bytes, got {}",
                bytes.len()
            )));
        }

        Keypair::try_from(bytes).map_err(|e| {
            L2Error::SigningError(format!("Invalid private key bytes: {}", sanitize_error!(e)))
        })
    }

    /// Base58 form of the full 64-byte keypair, suitable for `.env` files.
    pub fn to_base58(keypair: &Keypair) -> String {
        bs58::encode(keypair.to_bytes()).into_string()
    }
}
