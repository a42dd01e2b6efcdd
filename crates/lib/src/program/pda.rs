use solana_sdk::pubkey::Pubkey;

use crate::constant::GLOBAL_SEED;

/// The program's singleton configuration account.
pub fn get_global_pda(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GLOBAL_SEED], program_id)
}
