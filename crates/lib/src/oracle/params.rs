use solana_sdk::pubkey::Pubkey;
use std::{fmt, str::FromStr};

use crate::error::{L2Error, L2Result};

const PID_KEY: &str = "PID";
const MAX_VALUE_KEY: &str = "MAX_VALUE";
const GLOBAL_KEY: &str = "GLOBAL";
const MINT_KEY: &str = "MINT";

/// Parameters the program attaches to its function request, carried as
/// `KEY=VALUE,` pairs in the request's container params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerParams {
    pub program_id: Pubkey,
    pub max_value: u8,
    pub global: Pubkey,
    pub mint: Pubkey,
}

impl fmt::Display for ContainerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PID_KEY}={},{MAX_VALUE_KEY}={},{GLOBAL_KEY}={},{MINT_KEY}={},",
            self.program_id, self.max_value, self.global, self.mint
        )
    }
}

fn parse_param_pubkey(key: &str, value: &str) -> L2Result<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|_| L2Error::InvalidParams(format!("{key} is not a valid pubkey: {value}")))
}

impl ContainerParams {
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> L2Result<Self> {
        let params = std::str::from_utf8(bytes)
            .map_err(|e| L2Error::InvalidParams(format!("Container params are not UTF-8: {e}")))?;

        let mut program_id = Pubkey::default();
        let mut max_value = 0u8;
        let mut global = Pubkey::default();
        let mut mint = Pubkey::default();

        for pair in params.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                PID_KEY => program_id = parse_param_pubkey(PID_KEY, value)?,
                MAX_VALUE_KEY => {
                    max_value = value.parse::<u8>().map_err(|e| {
                        L2Error::InvalidParams(format!("{MAX_VALUE_KEY} is not a u8: {e}"))
                    })?
                }
                GLOBAL_KEY => global = parse_param_pubkey(GLOBAL_KEY, value)?,
                MINT_KEY => mint = parse_param_pubkey(MINT_KEY, value)?,
                other => tracing::debug!("Ignoring unknown container param {other}"),
            }
        }

        for (key, value) in [(PID_KEY, program_id), (GLOBAL_KEY, global), (MINT_KEY, mint)] {
            if value == Pubkey::default() {
                return Err(L2Error::InvalidParams(format!("{key} cannot be undefined")));
            }
        }
        if max_value == 0 {
            return Err(L2Error::InvalidParams(format!("{MAX_VALUE_KEY} must be greater than 0")));
        }

        Ok(Self { program_id, max_value, global, mint })
    }
}
