use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use spl_associated_token_account_interface::{
    address::get_associated_token_address_with_program_id,
    instruction::create_associated_token_account_idempotent,
};
use spl_token_2022_interface::{
    extension::{transfer_fee::instruction::initialize_transfer_fee_config, ExtensionType},
    instruction as token_2022_instruction,
    state::Mint as Token2022Mint,
};

use crate::{
    constant::FULL_TRANSFER_FEE_BP,
    error::{L2Error, L2Result},
    transaction::sign_and_send,
};

/// Settings for a Token-2022 mint carrying only the transfer-fee extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFeeMintArgs {
    pub decimals: u8,
    pub mint_authority: Pubkey,
    pub transfer_fee_config_authority: Pubkey,
    pub withdraw_withheld_authority: Pubkey,
    pub transfer_fee_bp: u16,
    pub maximum_fee: u64,
}

pub fn transfer_fee_mint_space() -> L2Result<usize> {
    Ok(ExtensionType::try_calculate_account_len::<Token2022Mint>(&[
        ExtensionType::TransferFeeConfig,
    ])?)
}

pub fn get_token_2022_ata(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &spl_token_2022_interface::id())
}

/// Instructions that allocate and initialize a transfer-fee mint. The extension must be
/// initialized before the mint itself.
pub fn transfer_fee_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent: u64,
    args: &TransferFeeMintArgs,
) -> L2Result<Vec<Instruction>> {
    if args.transfer_fee_bp > FULL_TRANSFER_FEE_BP {
        return Err(L2Error::InvalidParams(format!(
            "Transfer fee of {} bp exceeds {FULL_TRANSFER_FEE_BP}",
            args.transfer_fee_bp
        )));
    }

    let token_program = spl_token_2022_interface::id();
    let space = transfer_fee_mint_space()?;

    Ok(vec![
        solana_system_interface::instruction::create_account(
            payer,
            mint,
            rent,
            space as u64,
            &token_program,
        ),
        initialize_transfer_fee_config(
            &token_program,
            mint,
            Some(&args.transfer_fee_config_authority),
            Some(&args.withdraw_withheld_authority),
            args.transfer_fee_bp,
            args.maximum_fee,
        )?,
        token_2022_instruction::initialize_mint2(
            &token_program,
            mint,
            &args.mint_authority,
            None,
            args.decimals,
        )?,
    ])
}

/// Creates a new transfer-fee mint funded by `payer` and returns its address.
pub async fn create_transfer_fee_mint(
    rpc_client: &RpcClient,
    payer: &Keypair,
    args: &TransferFeeMintArgs,
) -> L2Result<Pubkey> {
    let mint = Keypair::new();
    let space = transfer_fee_mint_space()?;
    let rent = rpc_client.get_minimum_balance_for_rent_exemption(space).await?;

    let instructions =
        transfer_fee_mint_instructions(&payer.pubkey(), &mint.pubkey(), rent, args)?;
    sign_and_send(rpc_client, &instructions, payer, &[&mint]).await.map_err(|e| {
        L2Error::TokenOperationError(format!("Failed to create transfer-fee mint: {e}"))
    })?;

    tracing::info!(
        "Created mint {} ({} bp, {} decimals)",
        mint.pubkey(),
        args.transfer_fee_bp,
        args.decimals
    );
    Ok(mint.pubkey())
}

/// Creates the Token-2022 associated token account of `owner` if it does not exist yet.
pub async fn create_associated_token_account(
    rpc_client: &RpcClient,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
) -> L2Result<Pubkey> {
    let ata = get_token_2022_ata(owner, mint);
    let instruction = create_associated_token_account_idempotent(
        &payer.pubkey(),
        owner,
        mint,
        &spl_token_2022_interface::id(),
    );

    sign_and_send(rpc_client, &[instruction], payer, &[]).await?;
    tracing::debug!("Token account {ata} ready for {owner}");
    Ok(ata)
}

pub fn mint_to_instruction(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> L2Result<Instruction> {
    Ok(token_2022_instruction::mint_to(
        &spl_token_2022_interface::id(),
        mint,
        destination,
        authority,
        &[],
        amount,
    )?)
}

pub async fn mint_to(
    rpc_client: &RpcClient,
    payer: &Keypair,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Keypair,
    amount: u64,
) -> L2Result<Signature> {
    let instruction = mint_to_instruction(mint, destination, &authority.pubkey(), amount)?;
    let signature = sign_and_send(rpc_client, &[instruction], payer, &[authority]).await?;

    tracing::info!("Minted {amount} of {mint} to {destination}");
    Ok(signature)
}
