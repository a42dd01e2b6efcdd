use std::time::Duration;

use crate::common::*;
use l2_lib::{
    constant::FULL_TRANSFER_FEE_BP,
    harness::{initialize_global, setup_environment, wait_for_trigger, TestKeys},
    oracle::SwitchboardAccounts,
    program::fetch_global,
};

#[tokio::test]
#[ignore = "requires a local validator and a configured oracle function"]
async fn test_init_global_then_watch_trigger() -> anyhow::Result<()> {
    let ctx = TestContext::new()?;
    let program_id = ctx.program_id()?;
    let keys = TestKeys::generate();
    let hour = ctx.config.setup.hour_to_next_update;

    let switchboard = SwitchboardAccounts::load(&ctx.rpc_client, &ctx.config).await?;
    let mint =
        setup_environment(&ctx.rpc_client, &program_id, &keys, &ctx.config.setup).await?;

    let global = initialize_global(
        &ctx.rpc_client,
        &program_id,
        &keys.global_owner,
        &mint,
        &switchboard,
        hour,
    )
    .await?;

    assert_eq!(global.mint, mint);
    assert_eq!(global.hour_to_next_update, hour);
    assert_eq!(global.current_transfer_fee_bp, FULL_TRANSFER_FEE_BP);
    assert_eq!(global.switchboard_function, switchboard.function);
    assert!(global.switchboard_request.is_none());

    let observation = wait_for_trigger(
        &ctx.rpc_client,
        &program_id,
        Duration::from_millis(TEST_TRIGGER_WAIT_MS),
    )
    .await?;
    assert_slots_advanced(&observation)?;
    assert_eq!(observation.before.mint, mint);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_fetch_global_matches_configured_program() -> anyhow::Result<()> {
    let ctx = TestContext::new()?;
    let program_id = ctx.program_id()?;

    let global = fetch_global(&ctx.rpc_client, &program_id).await?;
    assert!(global.current_transfer_fee_bp <= FULL_TRANSFER_FEE_BP);
    assert_ne!(global.mint, solana_sdk::pubkey::Pubkey::default());

    Ok(())
}
