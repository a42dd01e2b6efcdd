use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use solana_system_interface::instruction::transfer;

use crate::{
    config::SetupConfig,
    error::L2Result,
    program::get_global_pda,
    token::{
        create_associated_token_account, create_transfer_fee_mint, mint_to, TransferFeeMintArgs,
    },
    transaction::{airdrop_and_confirm, sign_and_send},
};

/// Keypairs a harness run acts with. `global_owner` pays for everything after the airdrop,
/// `user1` owns the mint authority.
#[derive(Debug)]
pub struct TestKeys {
    pub global_owner: Keypair,
    pub user1: Keypair,
    pub user2: Keypair,
}

impl Default for TestKeys {
    fn default() -> Self {
        Self::generate()
    }
}

impl TestKeys {
    pub fn generate() -> Self {
        Self { global_owner: Keypair::new(), user1: Keypair::new(), user2: Keypair::new() }
    }

    pub fn global_pda(program_id: &Pubkey) -> Pubkey {
        get_global_pda(program_id).0
    }

    /// Token holders in the order their accounts are created.
    pub fn holders(&self) -> [Pubkey; 3] {
        [self.global_owner.pubkey(), self.user1.pubkey(), self.user2.pubkey()]
    }
}

pub fn fund_users_instructions(keys: &TestKeys, lamports: u64) -> Vec<Instruction> {
    let from = keys.global_owner.pubkey();
    vec![
        transfer(&from, &keys.user1.pubkey(), lamports),
        transfer(&from, &keys.user2.pubkey(), lamports),
    ]
}

pub fn mint_args(
    program_id: &Pubkey,
    keys: &TestKeys,
    setup: &SetupConfig,
) -> TransferFeeMintArgs {
    let global = TestKeys::global_pda(program_id);
    TransferFeeMintArgs {
        decimals: setup.decimals,
        mint_authority: keys.user1.pubkey(),
        transfer_fee_config_authority: global,
        withdraw_withheld_authority: global,
        transfer_fee_bp: setup.transfer_fee_bp,
        maximum_fee: setup.maximum_fee,
    }
}

async fn bootstrap(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    keys: &TestKeys,
    setup: &SetupConfig,
) -> L2Result<Pubkey> {
    airdrop_and_confirm(rpc_client, &keys.global_owner.pubkey(), setup.airdrop_lamports).await?;

    let funding = fund_users_instructions(keys, setup.user_fund_lamports);
    sign_and_send(rpc_client, &funding, &keys.global_owner, &[]).await?;
    tracing::info!("Funded user1 and user2 with {} lamports each", setup.user_fund_lamports);

    let mint =
        create_transfer_fee_mint(rpc_client, &keys.user1, &mint_args(program_id, keys, setup))
            .await?;

    for holder in keys.holders() {
        let ata = create_associated_token_account(rpc_client, &keys.global_owner, &holder, &mint)
            .await?;
        mint_to(rpc_client, &keys.global_owner, &mint, &ata, &keys.user1, setup.mint_amount)
            .await?;
    }

    Ok(mint)
}

/// Funds the test keys, creates the transfer-fee mint with the global PDA as its fee
/// authority, and gives every holder a funded token account. Returns the mint.
pub async fn setup_environment(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    keys: &TestKeys,
    setup: &SetupConfig,
) -> L2Result<Pubkey> {
    match bootstrap(rpc_client, program_id, keys, setup).await {
        Ok(mint) => {
            tracing::info!("Environment ready, mint {mint}");
            Ok(mint)
        }
        Err(e) => {
            tracing::error!("Environment setup failed: {e}");
            Err(e)
        }
    }
}
