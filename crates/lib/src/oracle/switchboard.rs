use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use spl_associated_token_account_interface::address::get_associated_token_address_with_program_id;

use crate::{
    config::{parse_pubkey, Config},
    constant::{ATTESTATION_STATE_SEED, MR_ENCLAVE_LEN},
    error::{L2Error, L2Result},
};

pub fn get_attestation_state_pda(attestation_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[ATTESTATION_STATE_SEED], attestation_program).0
}

/// Parses a measurement from hex, with or without a `0x` prefix, right-padding with zeroes.
pub fn parse_mr_enclave(value: &str) -> L2Result<[u8; MR_ENCLAVE_LEN]> {
    let trimmed = value.trim();
    let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytes = hex::decode(hex_str)
        .map_err(|e| L2Error::ConfigError(format!("Invalid mr_enclave hex: {e}")))?;
    if bytes.len() > MR_ENCLAVE_LEN {
        return Err(L2Error::ConfigError(format!(
            "mr_enclave must be at most {MR_ENCLAVE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut mr_enclave = [0u8; MR_ENCLAVE_LEN];
    mr_enclave[..bytes.len()].copy_from_slice(&bytes);
    Ok(mr_enclave)
}

/// Checks that `account` exists and belongs to `expected_owner`.
pub fn verify_owner(
    label: &str,
    address: &Pubkey,
    account: Option<&Account>,
    expected_owner: &Pubkey,
) -> L2Result<()> {
    let account = account.ok_or_else(|| L2Error::AccountNotFound(format!("{label} {address}")))?;
    if account.owner != *expected_owner {
        return Err(L2Error::OracleError(format!(
            "{label} {address} is owned by {}, expected {expected_owner}",
            account.owner
        )));
    }
    Ok(())
}

/// Oracle accounts `init_global` and `trigger_update` are wired to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchboardAccounts {
    pub attestation_program: Pubkey,
    pub attestation_program_state: Pubkey,
    pub attestation_queue: Pubkey,
    pub function: Pubkey,
    pub mr_enclave: Option<[u8; MR_ENCLAVE_LEN]>,
}

impl SwitchboardAccounts {
    /// Resolves the accounts named in `[switchboard]`. Creating a fresh queue or
    /// function needs the oracle network's own tooling, so both must be configured.
    pub fn from_config(config: &Config) -> L2Result<Self> {
        let attestation_program = config.attestation_program_id()?;

        let attestation_queue = match &config.switchboard.attestation_queue {
            Some(queue) => parse_pubkey("switchboard.attestation_queue", queue)?,
            None => {
                return Err(L2Error::OracleError(
                    "No attestation queue configured; bootstrapping a queue is not supported, \
                     set switchboard.attestation_queue to an existing queue"
                        .to_string(),
                ))
            }
        };

        let function = match &config.switchboard.function {
            Some(function) => parse_pubkey("switchboard.function", function)?,
            None => {
                return Err(L2Error::OracleError(
                    "No function configured; set switchboard.function to a function \
                     registered on the attestation queue"
                        .to_string(),
                ))
            }
        };

        let mr_enclave =
            config.switchboard.mr_enclave.as_deref().map(parse_mr_enclave).transpose()?;

        Ok(Self {
            attestation_program,
            attestation_program_state: get_attestation_state_pda(&attestation_program),
            attestation_queue,
            function,
            mr_enclave,
        })
    }

    /// Resolves the configured accounts and checks they exist on chain under the
    /// attestation program.
    pub async fn load(rpc_client: &RpcClient, config: &Config) -> L2Result<Self> {
        let accounts = Self::from_config(config)?;

        let fetched = rpc_client
            .get_multiple_accounts(&[accounts.attestation_queue, accounts.function])
            .await?;
        let queue = fetched.first().and_then(Option::as_ref);
        let function = fetched.get(1).and_then(Option::as_ref);
        accounts.verify(queue, function)?;

        tracing::info!(
            "Loaded attestation queue {} and function {}",
            accounts.attestation_queue,
            accounts.function
        );
        Ok(accounts)
    }

    pub fn verify(&self, queue: Option<&Account>, function: Option<&Account>) -> L2Result<()> {
        let program = &self.attestation_program;
        verify_owner("Attestation queue", &self.attestation_queue, queue, program)?;
        verify_owner("Function", &self.function, function, program)
    }
}

/// A fresh function request account and the wrapped-SOL escrow that funds it.
#[derive(Debug)]
pub struct FunctionRequest {
    pub keypair: Keypair,
    pub escrow: Pubkey,
}

impl Default for FunctionRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRequest {
    pub fn new() -> Self {
        Self::from_keypair(Keypair::new())
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        let escrow = request_escrow(&keypair.pubkey());
        Self { keypair, escrow }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Escrow of a function request: the request's native-mint ATA under the classic token program.
pub fn request_escrow(request: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(
        request,
        &spl_token_interface::native_mint::id(),
        &spl_token_interface::id(),
    )
}
