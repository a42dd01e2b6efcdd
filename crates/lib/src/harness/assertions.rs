use solana_sdk::pubkey::Pubkey;
use std::fmt::Debug;

use crate::{
    error::{L2Error, L2Result},
    program::Global,
};

/// Field values `Global` must hold right after `init_global`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalExpectation {
    pub hour_to_next_update: u8,
    pub current_transfer_fee_bp: u16,
    pub mint: Pubkey,
    pub switchboard_function: Pubkey,
    pub attestation_program_state: Pubkey,
    pub attestation_queue: Pubkey,
    pub switchboard_request: Option<Pubkey>,
}

fn check<T: PartialEq + Debug>(
    mismatches: &mut Vec<String>,
    field: &str,
    expected: &T,
    actual: &T,
) {
    if expected != actual {
        mismatches.push(format!("{field}: expected {expected:?}, got {actual:?}"));
    }
}

impl GlobalExpectation {
    /// Compares every field and reports all mismatches at once.
    pub fn verify(&self, global: &Global) -> L2Result<()> {
        let mut mismatches = Vec::new();

        check(
            &mut mismatches,
            "hour_to_next_update",
            &self.hour_to_next_update,
            &global.hour_to_next_update,
        );
        check(
            &mut mismatches,
            "current_transfer_fee_bp",
            &self.current_transfer_fee_bp,
            &global.current_transfer_fee_bp,
        );
        check(&mut mismatches, "mint", &self.mint, &global.mint);
        check(
            &mut mismatches,
            "switchboard_function",
            &self.switchboard_function,
            &global.switchboard_function,
        );
        check(
            &mut mismatches,
            "attestation_program_state",
            &self.attestation_program_state,
            &global.attestation_program_state,
        );
        check(
            &mut mismatches,
            "attestation_queue",
            &self.attestation_queue,
            &global.attestation_queue,
        );
        check(
            &mut mismatches,
            "switchboard_request",
            &self.switchboard_request,
            &global.switchboard_request,
        );

        if mismatches.is_empty() {
            tracing::info!("Global matches expectation");
            Ok(())
        } else {
            Err(L2Error::AssertionFailed(mismatches.join("; ")))
        }
    }
}
