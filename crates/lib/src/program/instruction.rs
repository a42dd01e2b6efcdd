//! Instruction builders for the L2 program.
//!
//! Account order and writability follow the program's account contexts exactly;
//! reordering any list breaks the program's account validation.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_associated_token_account_interface::address::get_associated_token_address;

use crate::{
    constant::instruction_names::{
        COLLECT_AND_BURN_FROM_ACCOUNT, COLLECT_AND_BURN_FROM_MINT, INIT_GLOBAL, TRIGGER_UPDATE,
    },
    error::{L2Error, L2Result},
    program::{discriminator::instruction_discriminator, pda::get_global_pda},
};

fn instruction_data<T: BorshSerialize>(name: &str, args: &T) -> L2Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)
        .map_err(|e| L2Error::SerializationError(format!("Failed to encode {name} args: {e}")))?;
    Ok(data)
}

/// Well-known programs every switchboard-facing instruction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramAccounts {
    pub switchboard_mint: Pubkey,
    pub token_program: Pubkey,
    pub token_program_22: Pubkey,
    pub associated_token_program: Pubkey,
    pub system_program: Pubkey,
}

impl Default for ProgramAccounts {
    fn default() -> Self {
        Self {
            switchboard_mint: spl_token_interface::native_mint::id(),
            token_program: spl_token_interface::id(),
            token_program_22: spl_token_2022_interface::id(),
            associated_token_program: spl_associated_token_account_interface::program::id(),
            system_program: solana_system_interface::program::id(),
        }
    }
}

impl ProgramAccounts {
    fn metas(&self) -> [AccountMeta; 5] {
        [
            AccountMeta::new_readonly(self.switchboard_mint, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.token_program_22, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitGlobalAccounts {
    pub global: Pubkey,
    pub mint: Pubkey,
    pub payer: Pubkey,
    pub switchboard: Pubkey,
    pub switchboard_state: Pubkey,
    pub switchboard_attestation_queue: Pubkey,
    pub switchboard_function: Pubkey,
    pub switchboard_request: Pubkey,
    pub switchboard_request_escrow: Pubkey,
    pub programs: ProgramAccounts,
}

impl InitGlobalAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.global, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.switchboard, false),
            AccountMeta::new_readonly(self.switchboard_state, false),
            AccountMeta::new_readonly(self.switchboard_attestation_queue, false),
            AccountMeta::new(self.switchboard_function, false),
            AccountMeta::new(self.switchboard_request, true),
            AccountMeta::new(self.switchboard_request_escrow, false),
        ];
        metas.extend(self.programs.metas());
        metas
    }
}

/// `init_global(hour_to_next_update)`. Signed by the payer and the new request account.
pub fn init_global(
    program_id: &Pubkey,
    accounts: &InitGlobalAccounts,
    hour_to_next_update: u8,
) -> L2Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: instruction_data(INIT_GLOBAL, &hour_to_next_update)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerUpdateAccounts {
    pub global: Pubkey,
    pub mint: Pubkey,
    pub enclave_signer: Pubkey,
    pub switchboard: Pubkey,
    pub switchboard_state: Pubkey,
    pub switchboard_attestation_queue: Pubkey,
    pub switchboard_function: Pubkey,
    pub switchboard_request: Pubkey,
    pub switchboard_request_escrow: Pubkey,
    pub programs: ProgramAccounts,
}

impl TriggerUpdateAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.global, false),
            AccountMeta::new(self.mint, false),
            AccountMeta::new_readonly(self.enclave_signer, true),
            AccountMeta::new_readonly(self.switchboard, false),
            AccountMeta::new_readonly(self.switchboard_state, false),
            AccountMeta::new_readonly(self.switchboard_attestation_queue, false),
            AccountMeta::new(self.switchboard_function, false),
            AccountMeta::new_readonly(self.switchboard_request, false),
            AccountMeta::new(self.switchboard_request_escrow, false),
        ];
        metas.extend(self.programs.metas());
        metas
    }
}

/// `trigger_update(result)`, normally emitted by the oracle function and signed by its enclave.
pub fn trigger_update(
    program_id: &Pubkey,
    accounts: &TriggerUpdateAccounts,
    result: u64,
) -> L2Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: instruction_data(TRIGGER_UPDATE, &result)?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectAndBurnAccounts {
    pub global: Pubkey,
    pub global_ata: Pubkey,
    pub mint: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
}

impl CollectAndBurnAccounts {
    /// Derives the global PDA and its associated token account for `mint`.
    pub fn new(program_id: &Pubkey, mint: &Pubkey) -> Self {
        let (global, _) = get_global_pda(program_id);
        Self {
            global,
            global_ata: get_associated_token_address(&global, mint),
            mint: *mint,
            token_program: spl_token_interface::id(),
            associated_token_program: spl_associated_token_account_interface::program::id(),
        }
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.global, false),
            AccountMeta::new(self.global_ata, false),
            // burn reduces supply, so the mint is passed writable
            AccountMeta::new(self.mint, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
        ]
    }
}

/// Withdraws withheld fees from `sources` into the global ATA, then burns the ATA balance.
pub fn collect_and_burn_from_account(
    program_id: &Pubkey,
    accounts: &CollectAndBurnAccounts,
    sources: &[Pubkey],
) -> L2Result<Instruction> {
    if sources.is_empty() {
        return Err(L2Error::InvalidParams(
            "collect_and_burn_from_account needs at least one source account".to_string(),
        ));
    }

    let mut metas = accounts.to_account_metas();
    metas.extend(sources.iter().map(|source| AccountMeta::new(*source, false)));

    Ok(Instruction {
        program_id: *program_id,
        accounts: metas,
        data: instruction_data(COLLECT_AND_BURN_FROM_ACCOUNT, &())?,
    })
}

/// Withdraws fees withheld on the mint itself into the global ATA, then burns them.
pub fn collect_and_burn_from_mint(
    program_id: &Pubkey,
    accounts: &CollectAndBurnAccounts,
) -> L2Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: instruction_data(COLLECT_AND_BURN_FROM_MINT, &())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::discriminator::DISCRIMINATOR_LEN;

    fn init_accounts() -> InitGlobalAccounts {
        InitGlobalAccounts {
            global: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            switchboard: Pubkey::new_unique(),
            switchboard_state: Pubkey::new_unique(),
            switchboard_attestation_queue: Pubkey::new_unique(),
            switchboard_function: Pubkey::new_unique(),
            switchboard_request: Pubkey::new_unique(),
            switchboard_request_escrow: Pubkey::new_unique(),
            programs: ProgramAccounts::default(),
        }
    }

    #[test]
    fn test_init_global_data() {
        let program_id = Pubkey::new_unique();
        let ix = init_global(&program_id, &init_accounts(), 48).unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data.len(), DISCRIMINATOR_LEN + 1);
        assert_eq!(ix.data[..DISCRIMINATOR_LEN], instruction_discriminator("init_global"));
        assert_eq!(ix.data[DISCRIMINATOR_LEN], 48);
    }

    #[test]
    fn test_init_global_account_order() {
        let accounts = init_accounts();
        let ix = init_global(&Pubkey::new_unique(), &accounts, 1).unwrap();

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                accounts.global,
                accounts.mint,
                accounts.payer,
                accounts.switchboard,
                accounts.switchboard_state,
                accounts.switchboard_attestation_queue,
                accounts.switchboard_function,
                accounts.switchboard_request,
                accounts.switchboard_request_escrow,
                spl_token_interface::native_mint::id(),
                spl_token_interface::id(),
                spl_token_2022_interface::id(),
                spl_associated_token_account_interface::program::id(),
                solana_system_interface::program::id(),
            ]
        );
    }

    #[test]
    fn test_init_global_signers_and_writability() {
        let accounts = init_accounts();
        let ix = init_global(&Pubkey::new_unique(), &accounts, 1).unwrap();

        let signers: Vec<Pubkey> =
            ix.accounts.iter().filter(|m| m.is_signer).map(|m| m.pubkey).collect();
        assert_eq!(signers, vec![accounts.payer, accounts.switchboard_request]);

        let writable: Vec<Pubkey> =
            ix.accounts.iter().filter(|m| m.is_writable).map(|m| m.pubkey).collect();
        assert_eq!(
            writable,
            vec![
                accounts.global,
                accounts.payer,
                accounts.switchboard_function,
                accounts.switchboard_request,
                accounts.switchboard_request_escrow,
            ]
        );
    }

    #[test]
    fn test_trigger_update_encodes_result_le() {
        let accounts = TriggerUpdateAccounts {
            global: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            enclave_signer: Pubkey::new_unique(),
            switchboard: Pubkey::new_unique(),
            switchboard_state: Pubkey::new_unique(),
            switchboard_attestation_queue: Pubkey::new_unique(),
            switchboard_function: Pubkey::new_unique(),
            switchboard_request: Pubkey::new_unique(),
            switchboard_request_escrow: Pubkey::new_unique(),
            programs: ProgramAccounts::default(),
        };
        let ix = trigger_update(&Pubkey::new_unique(), &accounts, 0x0102).unwrap();

        assert_eq!(ix.data[..DISCRIMINATOR_LEN], instruction_discriminator("trigger_update"));
        assert_eq!(ix.data[DISCRIMINATOR_LEN..], 0x0102u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 14);

        let signers: Vec<Pubkey> =
            ix.accounts.iter().filter(|m| m.is_signer).map(|m| m.pubkey).collect();
        assert_eq!(signers, vec![accounts.enclave_signer]);
        let writable: Vec<Pubkey> =
            ix.accounts.iter().filter(|m| m.is_writable).map(|m| m.pubkey).collect();
        assert_eq!(
            writable,
            vec![
                accounts.global,
                accounts.mint,
                accounts.switchboard_function,
                accounts.switchboard_request_escrow,
            ]
        );
    }

    #[test]
    fn test_collect_and_burn_from_account_appends_sources() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let accounts = CollectAndBurnAccounts::new(&program_id, &mint);
        let sources = [Pubkey::new_unique(), Pubkey::new_unique()];

        let ix = collect_and_burn_from_account(&program_id, &accounts, &sources).unwrap();

        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[0].pubkey, get_global_pda(&program_id).0);
        assert_eq!(ix.accounts[5].pubkey, sources[0]);
        assert!(ix.accounts[6].is_writable);
        assert_eq!(ix.data, instruction_discriminator("collect_and_burn_from_account").to_vec());
    }

    #[test]
    fn test_collect_and_burn_from_account_requires_sources() {
        let program_id = Pubkey::new_unique();
        let accounts = CollectAndBurnAccounts::new(&program_id, &Pubkey::new_unique());
        let result = collect_and_burn_from_account(&program_id, &accounts, &[]);
        assert!(matches!(result, Err(L2Error::InvalidParams(_))));
    }

    #[test]
    fn test_collect_and_burn_from_mint() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let accounts = CollectAndBurnAccounts::new(&program_id, &mint);
        let ix = collect_and_burn_from_mint(&program_id, &accounts).unwrap();

        assert_eq!(ix.accounts.len(), 5);
        assert_eq!(ix.accounts[1].pubkey, get_associated_token_address(&accounts.global, &mint));
        assert_eq!(ix.data, instruction_discriminator("collect_and_burn_from_mint").to_vec());
    }
}
