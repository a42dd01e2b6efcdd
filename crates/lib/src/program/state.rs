use borsh::{BorshDeserialize, BorshSerialize};
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use crate::{
    constant::GLOBAL_ACCOUNT_NAME,
    error::{L2Error, L2Result},
    program::{
        discriminator::{account_discriminator, DISCRIMINATOR_LEN},
        pda::get_global_pda,
    },
    sanitize_error,
};

/// On-chain byte layout of the `Global` account, after the discriminator.
#[derive(BorshSerialize, BorshDeserialize)]
struct GlobalLayout {
    hour_to_next_update: u8,
    next_update_slot: u64,
    mint: [u8; 32],
    switchboard_function: [u8; 32],
    attestation_program_state: [u8; 32],
    attestation_queue: [u8; 32],
    switchboard_request: Option<[u8; 32]>,
    current_transfer_fee_bp: u16,
}

/// Decoded `Global` account: the transfer-fee schedule and the oracle wiring behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global {
    pub hour_to_next_update: u8,
    pub next_update_slot: u64,
    pub mint: Pubkey,
    pub switchboard_function: Pubkey,
    pub attestation_program_state: Pubkey,
    pub attestation_queue: Pubkey,
    pub switchboard_request: Option<Pubkey>,
    pub current_transfer_fee_bp: u16,
}

impl From<GlobalLayout> for Global {
    fn from(layout: GlobalLayout) -> Self {
        Self {
            hour_to_next_update: layout.hour_to_next_update,
            next_update_slot: layout.next_update_slot,
            mint: Pubkey::new_from_array(layout.mint),
            switchboard_function: Pubkey::new_from_array(layout.switchboard_function),
            attestation_program_state: Pubkey::new_from_array(layout.attestation_program_state),
            attestation_queue: Pubkey::new_from_array(layout.attestation_queue),
            switchboard_request: layout.switchboard_request.map(Pubkey::new_from_array),
            current_transfer_fee_bp: layout.current_transfer_fee_bp,
        }
    }
}

impl From<&Global> for GlobalLayout {
    fn from(global: &Global) -> Self {
        Self {
            hour_to_next_update: global.hour_to_next_update,
            next_update_slot: global.next_update_slot,
            mint: global.mint.to_bytes(),
            switchboard_function: global.switchboard_function.to_bytes(),
            attestation_program_state: global.attestation_program_state.to_bytes(),
            attestation_queue: global.attestation_queue.to_bytes(),
            switchboard_request: global.switchboard_request.map(|key| key.to_bytes()),
            current_transfer_fee_bp: global.current_transfer_fee_bp,
        }
    }
}

impl Global {
    /// Decodes raw account data. Trailing bytes past the known fields are ignored,
    /// since the program allocates the account with padding.
    pub fn try_from_account_data(data: &[u8]) -> L2Result<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(L2Error::InvalidAccountData(format!(
                "Global account data too short: {} bytes",
                data.len()
            )));
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != account_discriminator(GLOBAL_ACCOUNT_NAME) {
            return Err(L2Error::InvalidAccountData(
                "Account discriminator does not match Global".to_string(),
            ));
        }

        let layout = GlobalLayout::deserialize(&mut body).map_err(|e| {
            L2Error::InvalidAccountData(format!("Failed to decode Global: {}", sanitize_error!(e)))
        })?;

        Ok(layout.into())
    }

    /// Encodes the account as the program stores it, discriminator included.
    pub fn to_account_data(&self) -> L2Result<Vec<u8>> {
        let mut data = account_discriminator(GLOBAL_ACCOUNT_NAME).to_vec();
        GlobalLayout::from(self).serialize(&mut data).map_err(|e| {
            L2Error::SerializationError(format!("Failed to encode Global: {}", sanitize_error!(e)))
        })?;
        Ok(data)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "hour_to_next_update": self.hour_to_next_update,
            "next_update_slot": self.next_update_slot,
            "mint": self.mint.to_string(),
            "switchboard_function": self.switchboard_function.to_string(),
            "attestation_program_state": self.attestation_program_state.to_string(),
            "attestation_queue": self.attestation_queue.to_string(),
            "switchboard_request": self.switchboard_request.map(|key| key.to_string()),
            "current_transfer_fee_bp": self.current_transfer_fee_bp,
        })
    }
}

/// Fetches and decodes the `Global` PDA of `program_id`.
pub async fn fetch_global(rpc_client: &RpcClient, program_id: &Pubkey) -> L2Result<Global> {
    let (global, _) = get_global_pda(program_id);
    let account = rpc_client.get_account(&global).await.map_err(|e| {
        let error = L2Error::from(e);
        match error {
            L2Error::AccountNotFound(_) => L2Error::AccountNotFound(global.to_string()),
            other => other,
        }
    })?;

    if account.owner != *program_id {
        return Err(L2Error::InvalidAccountData(format!(
            "Global account {global} is owned by {}, expected {program_id}",
            account.owner
        )));
    }

    Global::try_from_account_data(&account.data)
}
