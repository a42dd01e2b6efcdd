use crate::common::*;
use l2_lib::{
    harness::{setup_environment, TestKeys},
    token::get_token_2022_ata,
};

#[tokio::test]
#[ignore = "requires a local validator"]
async fn test_setup_environment_creates_fee_mint() -> anyhow::Result<()> {
    let ctx = TestContext::new()?;
    let program_id = ctx.program_id()?;
    let keys = TestKeys::generate();

    let mint =
        setup_environment(&ctx.rpc_client, &program_id, &keys, &ctx.config.setup).await?;

    let mint_account = ctx.rpc_client.get_account(&mint).await?;
    assert_eq!(mint_account.owner, spl_token_2022_interface::id(), "mint must be Token-2022");
    assert_transfer_fee_authority(&mint_account.data, &TestKeys::global_pda(&program_id))?;

    for holder in keys.holders() {
        let ata = get_token_2022_ata(&holder, &mint);
        let balance = ctx.token_balance(&ata).await?;
        assert_eq!(balance, ctx.config.setup.mint_amount, "unexpected balance for {holder}");
    }

    Ok(())
}
