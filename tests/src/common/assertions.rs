use anyhow::{ensure, Result};
use l2_lib::harness::TriggerObservation;
use solana_sdk::pubkey::Pubkey;
use spl_token_2022_interface::{
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
    state::Mint,
};

/// Checks that `data` is a Token-2022 mint whose transfer fee authorities are `authority`
pub fn assert_transfer_fee_authority(data: &[u8], authority: &Pubkey) -> Result<()> {
    let mint = StateWithExtensions::<Mint>::unpack(data)?;
    let fee_config = mint.get_extension::<TransferFeeConfig>()?;

    let config_authority: Option<Pubkey> = fee_config.transfer_fee_config_authority.into();
    let withdraw_authority: Option<Pubkey> = fee_config.withdraw_withheld_authority.into();

    ensure!(
        config_authority == Some(*authority),
        "transfer fee config authority is {config_authority:?}, expected {authority}"
    );
    ensure!(
        withdraw_authority == Some(*authority),
        "withdraw withheld authority is {withdraw_authority:?}, expected {authority}"
    );
    Ok(())
}

/// Checks that the slot advanced across the observation window
pub fn assert_slots_advanced(observation: &TriggerObservation) -> Result<()> {
    ensure!(
        observation.slot_after > observation.slot_before,
        "slot did not advance: {} -> {}",
        observation.slot_before,
        observation.slot_after
    );
    Ok(())
}
