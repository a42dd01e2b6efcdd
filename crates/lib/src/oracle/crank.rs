//! Off-chain side of the oracle function: turns a request's container params into
//! the `trigger_update` instruction the enclave signs and relays back to the program.

use rand::Rng;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::{
    error::L2Result,
    oracle::{
        params::ContainerParams,
        switchboard::{request_escrow, SwitchboardAccounts},
    },
    program::instruction::{trigger_update, ProgramAccounts, TriggerUpdateAccounts},
};

/// Returns a value in `[min, max]`. Flipped bounds are swapped.
pub fn generate_randomness<R: Rng + ?Sized>(rng: &mut R, min: u8, max: u8) -> u8 {
    if min == max {
        return min;
    }
    if min > max {
        return generate_randomness(rng, max, min);
    }
    rng.random_range(min..=max)
}

/// Accounts the function runner knows about when it executes a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRunnerContext {
    pub enclave_signer: Pubkey,
    pub switchboard: Pubkey,
    pub switchboard_state: Pubkey,
    pub attestation_queue: Pubkey,
    pub function: Pubkey,
    pub request: Pubkey,
    pub request_escrow: Pubkey,
}

impl FunctionRunnerContext {
    pub fn new(enclave_signer: Pubkey, accounts: &SwitchboardAccounts, request: Pubkey) -> Self {
        Self {
            enclave_signer,
            switchboard: accounts.attestation_program,
            switchboard_state: accounts.attestation_program_state,
            attestation_queue: accounts.attestation_queue,
            function: accounts.function,
            request,
            request_escrow: request_escrow(&request),
        }
    }
}

/// Builds `trigger_update` with a random result in `[1, params.max_value]`.
pub fn build_trigger_update<R: Rng + ?Sized>(
    runner: &FunctionRunnerContext,
    params: &ContainerParams,
    rng: &mut R,
) -> L2Result<(Instruction, u8)> {
    let result = generate_randomness(rng, 1, params.max_value);
    tracing::info!("Random result {result} (max {})", params.max_value);

    let accounts = TriggerUpdateAccounts {
        global: params.global,
        mint: params.mint,
        enclave_signer: runner.enclave_signer,
        switchboard: runner.switchboard,
        switchboard_state: runner.switchboard_state,
        switchboard_attestation_queue: runner.attestation_queue,
        switchboard_function: runner.function,
        switchboard_request: runner.request,
        switchboard_request_escrow: runner.request_escrow,
        programs: ProgramAccounts::default(),
    };

    let instruction = trigger_update(&params.program_id, &accounts, u64::from(result))?;
    Ok((instruction, result))
}

/// Entry point for a request: decodes the raw container params and emits the
/// instructions to relay.
pub fn process_request<R: Rng + ?Sized>(
    runner: &FunctionRunnerContext,
    raw_params: &[u8],
    rng: &mut R,
) -> L2Result<Vec<Instruction>> {
    let params = ContainerParams::decode(raw_params)?;
    let (instruction, _) = build_trigger_update(runner, &params, rng)?;
    Ok(vec![instruction])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::L2Error,
        program::discriminator::{instruction_discriminator, DISCRIMINATOR_LEN},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn runner() -> FunctionRunnerContext {
        let request = Pubkey::new_unique();
        FunctionRunnerContext {
            enclave_signer: Pubkey::new_unique(),
            switchboard: Pubkey::new_unique(),
            switchboard_state: Pubkey::new_unique(),
            attestation_queue: Pubkey::new_unique(),
            function: Pubkey::new_unique(),
            request,
            request_escrow: request_escrow(&request),
        }
    }

    fn params(max_value: u8) -> ContainerParams {
        ContainerParams {
            program_id: Pubkey::new_unique(),
            max_value,
            global: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_generate_randomness_flipped_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let result = generate_randomness(&mut rng, 100, 50);
            assert!((50..=100).contains(&result));
        }
    }

    #[test]
    fn test_generate_randomness_equal_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(generate_randomness(&mut rng, 100, 100), 100);
    }

    #[test]
    fn test_generate_randomness_covers_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 10];
        for _ in 0..1000 {
            counts[generate_randomness(&mut rng, 0, 9) as usize] += 1;
        }
        assert!(counts.iter().all(|count| *count > 0));
    }

    #[test]
    fn test_generate_randomness_full_u8_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let _ = generate_randomness(&mut rng, 0, u8::MAX);
        }
    }

    #[test]
    fn test_build_trigger_update() {
        let runner = runner();
        let params = params(254);
        let mut rng = StdRng::seed_from_u64(3);

        let (ix, result) = build_trigger_update(&runner, &params, &mut rng).unwrap();

        assert!((1..=254).contains(&result));
        assert_eq!(ix.program_id, params.program_id);
        assert_eq!(ix.data[..DISCRIMINATOR_LEN], instruction_discriminator("trigger_update"));
        assert_eq!(ix.data[DISCRIMINATOR_LEN..], u64::from(result).to_le_bytes());
        assert_eq!(ix.accounts[0].pubkey, params.global);
        assert_eq!(ix.accounts[1].pubkey, params.mint);
        assert_eq!(ix.accounts[2].pubkey, runner.enclave_signer);
        assert!(ix.accounts[2].is_signer);
        assert_eq!(ix.accounts[8].pubkey, runner.request_escrow);
    }

    #[test]
    fn test_max_value_one_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(9);
        let (_, result) = build_trigger_update(&runner(), &params(1), &mut rng).unwrap();
        assert_eq!(result, 1);
    }

    #[test]
    fn test_process_request() {
        let params = params(10);
        let mut rng = StdRng::seed_from_u64(5);

        let instructions = process_request(&runner(), &params.encode(), &mut rng).unwrap();
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].program_id, params.program_id);

        let result = process_request(&runner(), b"MAX_VALUE=1,", &mut rng);
        assert!(matches!(result, Err(L2Error::InvalidParams(_))));
    }
}
