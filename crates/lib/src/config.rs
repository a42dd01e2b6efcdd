use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::{fs, path::Path, str::FromStr, time::Duration};

use crate::{
    constant::{
        DEFAULT_AIRDROP_LAMPORTS, DEFAULT_HOUR_TO_NEXT_UPDATE, DEFAULT_MAXIMUM_FEE,
        DEFAULT_MINT_AMOUNT, DEFAULT_MINT_DECIMALS, DEFAULT_RPC_URL, DEFAULT_TRIGGER_WAIT_MS,
        DEFAULT_USER_FUND_LAMPORTS, FULL_TRANSFER_FEE_BP, L2_PROGRAM_ID,
        SWITCHBOARD_ATTESTATION_PROGRAM_ID,
    },
    error::{L2Error, L2Result},
    sanitize_error,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub switchboard: SwitchboardConfig,
    #[serde(default)]
    pub setup: SetupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub rpc_url: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { rpc_url: DEFAULT_RPC_URL.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub program_id: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self { program_id: L2_PROGRAM_ID.to_string() }
    }
}

/// Oracle accounts the harness wires into `init_global`.
///
/// `attestation_queue` and `function` must point at accounts that already exist on
/// the target cluster; the harness loads them but does not create them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchboardConfig {
    pub attestation_program_id: String,
    pub attestation_queue: Option<String>,
    pub function: Option<String>,
    pub mr_enclave: Option<String>,
}

impl Default for SwitchboardConfig {
    fn default() -> Self {
        Self {
            attestation_program_id: SWITCHBOARD_ATTESTATION_PROGRAM_ID.to_string(),
            attestation_queue: None,
            function: None,
            mr_enclave: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub hour_to_next_update: u8,
    pub transfer_fee_bp: u16,
    pub decimals: u8,
    pub maximum_fee: u64,
    pub airdrop_lamports: u64,
    pub user_fund_lamports: u64,
    pub mint_amount: u64,
    pub trigger_wait_ms: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            hour_to_next_update: DEFAULT_HOUR_TO_NEXT_UPDATE,
            transfer_fee_bp: FULL_TRANSFER_FEE_BP,
            decimals: DEFAULT_MINT_DECIMALS,
            maximum_fee: DEFAULT_MAXIMUM_FEE,
            airdrop_lamports: DEFAULT_AIRDROP_LAMPORTS,
            user_fund_lamports: DEFAULT_USER_FUND_LAMPORTS,
            mint_amount: DEFAULT_MINT_AMOUNT,
            trigger_wait_ms: DEFAULT_TRIGGER_WAIT_MS,
        }
    }
}

impl SetupConfig {
    pub fn trigger_wait(&self) -> Duration {
        Duration::from_millis(self.trigger_wait_ms)
    }
}

pub fn parse_pubkey(field: &str, value: &str) -> L2Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|e| {
        L2Error::ConfigError(format!("Invalid pubkey for {field}: {}", sanitize_error!(e)))
    })
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(path: P) -> L2Result<Config> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            L2Error::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                sanitize_error!(e)
            ))
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> L2Result<Config> {
        if path.as_ref().exists() {
            Self::load_config(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.as_ref().display());
            Ok(Config::default())
        }
    }

    pub fn program_id(&self) -> L2Result<Pubkey> {
        parse_pubkey("program.program_id", &self.program.program_id)
    }

    pub fn attestation_program_id(&self) -> L2Result<Pubkey> {
        parse_pubkey("switchboard.attestation_program_id", &self.switchboard.attestation_program_id)
    }

    pub fn validate(&self) -> L2Result<()> {
        self.program_id()?;
        self.attestation_program_id()?;

        if let Some(queue) = &self.switchboard.attestation_queue {
            parse_pubkey("switchboard.attestation_queue", queue)?;
        }
        if let Some(function) = &self.switchboard.function {
            parse_pubkey("switchboard.function", function)?;
        }

        if self.setup.transfer_fee_bp > FULL_TRANSFER_FEE_BP {
            return Err(L2Error::ConfigError(format!(
                "setup.transfer_fee_bp must be at most {FULL_TRANSFER_FEE_BP}, got {}",
                self.setup.transfer_fee_bp
            )));
        }

        if self.setup.hour_to_next_update == 0 {
            return Err(L2Error::ConfigError(
                "setup.hour_to_next_update must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
