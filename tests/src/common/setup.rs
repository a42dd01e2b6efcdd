use anyhow::Result;
use l2_lib::Config;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use crate::common::{DEFAULT_TEST_CONFIG, RPC_URL_ENV, TEST_CONFIG_ENV};

/// Shared state for tests that talk to a local validator with the program deployed
pub struct TestContext {
    pub rpc_client: Arc<RpcClient>,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();
        let config_path =
            std::env::var(TEST_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_TEST_CONFIG.to_string());
        let config = Config::load_or_default(&config_path)?;

        let rpc_url = resolve_rpc_url(std::env::var(RPC_URL_ENV).ok(), &config);
        let rpc_client =
            Arc::new(RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()));

        Ok(Self { rpc_client, config })
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Ok(self.config.program_id()?)
    }

    /// Raw token amount held by `token_account`
    pub async fn token_balance(&self, token_account: &Pubkey) -> Result<u64> {
        let balance = self.rpc_client.get_token_account_balance(token_account).await?;
        Ok(balance.amount.parse::<u64>()?)
    }
}

/// `RPC_URL` wins over `cluster.rpc_url`, the same order the CLI applies
pub fn resolve_rpc_url(env_rpc_url: Option<String>, config: &Config) -> String {
    env_rpc_url.unwrap_or_else(|| config.cluster.rpc_url.clone())
}
