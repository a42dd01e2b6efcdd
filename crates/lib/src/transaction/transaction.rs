use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    constant::{CONFIRMATION_POLL_INTERVAL_MS, MAX_CONFIRMATION_POLLS},
    error::{L2Error, L2Result},
    sanitize_error,
};

/// Builds a legacy transaction paid by `payer` and signed by every distinct signer.
pub fn build_signed_transaction(
    instructions: &[Instruction],
    payer: &Keypair,
    extra_signers: &[&Keypair],
    recent_blockhash: Hash,
) -> L2Result<Transaction> {
    let mut signers: Vec<&Keypair> = vec![payer];
    for signer in extra_signers {
        if !signers.iter().any(|s| s.pubkey() == signer.pubkey()) {
            signers.push(signer);
        }
    }

    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    transaction.try_sign(&signers, recent_blockhash)?;
    Ok(transaction)
}

/// Signs with a fresh blockhash, sends, and waits for confirmation.
pub async fn sign_and_send(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    payer: &Keypair,
    extra_signers: &[&Keypair],
) -> L2Result<Signature> {
    let recent_blockhash = rpc_client.get_latest_blockhash().await?;
    let transaction =
        build_signed_transaction(instructions, payer, extra_signers, recent_blockhash)?;

    let signature = rpc_client.send_and_confirm_transaction(&transaction).await.map_err(|e| {
        L2Error::TransactionFailed(format!("Failed to send transaction: {}", sanitize_error!(e)))
    })?;

    tracing::debug!("Confirmed transaction {signature}");
    Ok(signature)
}

/// Polls until `signature` reaches the client's commitment or the poll budget runs out.
/// A transaction that landed with an error fails immediately.
pub async fn wait_for_confirmation(rpc_client: &RpcClient, signature: &Signature) -> L2Result<()> {
    for _ in 0..MAX_CONFIRMATION_POLLS {
        match rpc_client.get_signature_status(signature).await? {
            Some(Ok(())) => return Ok(()),
            Some(Err(e)) => {
                return Err(L2Error::TransactionFailed(format!(
                    "Transaction {signature} failed: {}",
                    sanitize_error!(e)
                )));
            }
            None => {
                tokio::time::sleep(Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS)).await;
            }
        }
    }

    Err(L2Error::TransactionFailed(format!(
        "Transaction {signature} was not confirmed after {MAX_CONFIRMATION_POLLS} polls"
    )))
}

pub async fn airdrop_and_confirm(
    rpc_client: &RpcClient,
    recipient: &Pubkey,
    lamports: u64,
) -> L2Result<Signature> {
    let signature = rpc_client.request_airdrop(recipient, lamports).await?;
    wait_for_confirmation(rpc_client, &signature).await?;

    tracing::info!("Airdropped {lamports} lamports to {recipient}");
    Ok(signature)
}
