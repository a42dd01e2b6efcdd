use std::{sync::Arc, time::Duration};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;

use crate::constant::DEFAULT_RPC_TIMEOUT_SECS;

pub fn get_rpc_client(rpc_url: &str) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_with_timeout_and_commitment(
        rpc_url.to_string(),
        Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
        CommitmentConfig::confirmed(),
    ))
}
