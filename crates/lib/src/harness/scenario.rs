use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};

use crate::{
    config::Config,
    constant::{FULL_TRANSFER_FEE_BP, MAX_RAND_VALUE},
    error::L2Result,
    harness::{
        assertions::GlobalExpectation,
        env::{setup_environment, TestKeys},
    },
    oracle::{
        crank::{build_trigger_update, FunctionRunnerContext},
        ContainerParams, FunctionRequest, SwitchboardAccounts,
    },
    program::{
        fetch_global, get_global_pda,
        instruction::{
            collect_and_burn_from_account, collect_and_burn_from_mint, init_global,
            CollectAndBurnAccounts, InitGlobalAccounts, ProgramAccounts,
        },
        Global,
    },
    transaction::sign_and_send,
};

pub fn init_global_accounts(
    program_id: &Pubkey,
    payer: &Pubkey,
    mint: &Pubkey,
    switchboard: &SwitchboardAccounts,
    request: &FunctionRequest,
) -> InitGlobalAccounts {
    InitGlobalAccounts {
        global: get_global_pda(program_id).0,
        mint: *mint,
        payer: *payer,
        switchboard: switchboard.attestation_program,
        switchboard_state: switchboard.attestation_program_state,
        switchboard_attestation_queue: switchboard.attestation_queue,
        switchboard_function: switchboard.function,
        switchboard_request: request.pubkey(),
        switchboard_request_escrow: request.escrow,
        programs: ProgramAccounts::default(),
    }
}

/// State `init_global` leaves behind: the requested hour, a 100% fee, and no stored request.
pub fn expected_after_init(
    mint: &Pubkey,
    switchboard: &SwitchboardAccounts,
    hour_to_next_update: u8,
) -> GlobalExpectation {
    GlobalExpectation {
        hour_to_next_update,
        current_transfer_fee_bp: FULL_TRANSFER_FEE_BP,
        mint: *mint,
        switchboard_function: switchboard.function,
        attestation_program_state: switchboard.attestation_program_state,
        attestation_queue: switchboard.attestation_queue,
        switchboard_request: None,
    }
}

/// Submits `init_global` with a fresh function request, then checks the resulting account.
///
/// A failed submission is only logged: the account may already exist from an earlier run,
/// in which case the verification below decides the outcome.
pub async fn initialize_global(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    payer: &Keypair,
    mint: &Pubkey,
    switchboard: &SwitchboardAccounts,
    hour_to_next_update: u8,
) -> L2Result<Global> {
    let request = FunctionRequest::new();
    let accounts =
        init_global_accounts(program_id, &payer.pubkey(), mint, switchboard, &request);
    let instruction = init_global(program_id, &accounts, hour_to_next_update)?;

    match sign_and_send(rpc_client, &[instruction], payer, &[&request.keypair]).await {
        Ok(signature) => {
            tracing::info!("init_global confirmed: {signature} (request {})", request.pubkey())
        }
        Err(e) => tracing::warn!("init_global failed: {e}"),
    }

    let global = fetch_global(rpc_client, program_id).await?;
    tracing::info!("Global after init: {}", global.to_json());

    expected_after_init(mint, switchboard, hour_to_next_update).verify(&global)?;
    Ok(global)
}

/// Two snapshots of `Global` taken around a fixed wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerObservation {
    pub slot_before: u64,
    pub slot_after: u64,
    pub before: Global,
    pub after: Global,
}

impl TriggerObservation {
    pub fn slots_elapsed(&self) -> u64 {
        self.slot_after.saturating_sub(self.slot_before)
    }

    /// True once an oracle update has landed between the two snapshots.
    pub fn updated(&self) -> bool {
        self.before.next_update_slot != self.after.next_update_slot
            || self.before.current_transfer_fee_bp != self.after.current_transfer_fee_bp
    }
}

pub async fn wait_for_trigger(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    wait: Duration,
) -> L2Result<TriggerObservation> {
    let slot_before = rpc_client.get_slot().await?;
    let before = fetch_global(rpc_client, program_id).await?;
    tracing::info!("Slot {slot_before}, global: {}", before.to_json());

    tokio::time::sleep(wait).await;

    let slot_after = rpc_client.get_slot().await?;
    let after = fetch_global(rpc_client, program_id).await?;
    tracing::info!("Slot {slot_after}, global: {}", after.to_json());

    let observation = TriggerObservation { slot_before, slot_after, before, after };
    if observation.updated() {
        tracing::info!(
            "Fee schedule updated to {} bp, next update at slot {}",
            observation.after.current_transfer_fee_bp,
            observation.after.next_update_slot
        );
    } else {
        tracing::info!("No update after {} slots", observation.slots_elapsed());
    }
    Ok(observation)
}

/// Picks the collect-and-burn variant: with no `sources` the fees withheld on the mint
/// itself are collected.
pub fn collect_and_burn_instruction(
    program_id: &Pubkey,
    mint: &Pubkey,
    sources: &[Pubkey],
) -> L2Result<Instruction> {
    let accounts = CollectAndBurnAccounts::new(program_id, mint);
    if sources.is_empty() {
        collect_and_burn_from_mint(program_id, &accounts)
    } else {
        collect_and_burn_from_account(program_id, &accounts, sources)
    }
}

/// Withdraws withheld fees into the global token account and burns them.
pub async fn collect_and_burn(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    payer: &Keypair,
    mint: &Pubkey,
    sources: &[Pubkey],
) -> L2Result<Signature> {
    let instruction = collect_and_burn_instruction(program_id, mint, sources)?;

    let signature = sign_and_send(rpc_client, &[instruction], payer, &[]).await?;
    tracing::info!("Collected and burned withheld fees of {mint}: {signature}");
    Ok(signature)
}

/// Plays the oracle function once: builds the `trigger_update` it would emit for the
/// current `Global` and submits it signed by `enclave_signer`.
pub async fn crank_trigger(
    rpc_client: &RpcClient,
    config: &Config,
    enclave_signer: &Keypair,
    request: &Pubkey,
) -> L2Result<Signature> {
    let program_id = config.program_id()?;
    let switchboard = SwitchboardAccounts::from_config(config)?;
    let global = fetch_global(rpc_client, &program_id).await?;

    let params = ContainerParams {
        program_id,
        max_value: MAX_RAND_VALUE,
        global: get_global_pda(&program_id).0,
        mint: global.mint,
    };
    let runner = FunctionRunnerContext::new(enclave_signer.pubkey(), &switchboard, *request);
    let (instruction, result) = build_trigger_update(&runner, &params, &mut rand::rng())?;

    let signature = sign_and_send(rpc_client, &[instruction], enclave_signer, &[]).await?;
    tracing::info!("trigger_update({result}) confirmed: {signature}");
    Ok(signature)
}

/// Full run: oracle accounts, environment bootstrap, `init_global` with verification, and
/// one trigger window.
pub async fn run(
    rpc_client: &RpcClient,
    config: &Config,
    keys: &TestKeys,
) -> L2Result<TriggerObservation> {
    let program_id = config.program_id()?;
    let switchboard = SwitchboardAccounts::load(rpc_client, config).await?;

    let mint = setup_environment(rpc_client, &program_id, keys, &config.setup).await?;

    initialize_global(
        rpc_client,
        &program_id,
        &keys.global_owner,
        &mint,
        &switchboard,
        config.setup.hour_to_next_update,
    )
    .await?;

    wait_for_trigger(rpc_client, &program_id, config.setup.trigger_wait()).await
}
