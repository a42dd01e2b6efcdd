use std::{sync::Arc, time::Duration};

use l2_lib::{
    config::parse_pubkey,
    error::L2Result,
    harness::{
        env::setup_environment,
        scenario::{self, collect_and_burn, crank_trigger, initialize_global, wait_for_trigger},
        TestKeys, TriggerObservation,
    },
    oracle::{ContainerParams, SwitchboardAccounts},
    program::{fetch_global, get_global_pda},
    Config, KeypairUtil,
};
use serde_json::json;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Signer};

use crate::{BurnCommands, CrankCommands, GlobalCommands, ParamsCommands};

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn observation_json(observation: &TriggerObservation) -> serde_json::Value {
    json!({
        "observed_at": chrono::Utc::now().to_rfc3339(),
        "slot_before": observation.slot_before,
        "slot_after": observation.slot_after,
        "updated": observation.updated(),
        "before": observation.before.to_json(),
        "after": observation.after.to_json(),
    })
}

fn keys_json(keys: &TestKeys) -> serde_json::Value {
    json!({
        "global_owner": {
            "pubkey": keys.global_owner.pubkey().to_string(),
            "private_key": KeypairUtil::to_base58(&keys.global_owner),
        },
        "user1": {
            "pubkey": keys.user1.pubkey().to_string(),
            "private_key": KeypairUtil::to_base58(&keys.user1),
        },
        "user2": {
            "pubkey": keys.user2.pubkey().to_string(),
            "private_key": KeypairUtil::to_base58(&keys.user2),
        },
    })
}

async fn resolve_mint(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    mint: Option<String>,
) -> L2Result<Pubkey> {
    match mint {
        Some(mint) => parse_pubkey("--mint", &mint),
        None => Ok(fetch_global(rpc_client, program_id).await?.mint),
    }
}

pub async fn run(rpc_client: &Arc<RpcClient>, config: &Config) -> L2Result<()> {
    let keys = TestKeys::generate();
    let observation = scenario::run(rpc_client, config, &keys).await?;

    print_json(&json!({
        "keys": keys_json(&keys),
        "global": get_global_pda(&config.program_id()?).0.to_string(),
        "trigger": observation_json(&observation),
    }));
    Ok(())
}

pub async fn setup_env(rpc_client: &Arc<RpcClient>, config: &Config) -> L2Result<()> {
    let program_id = config.program_id()?;
    let keys = TestKeys::generate();
    let mint = setup_environment(rpc_client, &program_id, &keys, &config.setup).await?;

    print_json(&json!({
        "keys": keys_json(&keys),
        "mint": mint.to_string(),
        "global": get_global_pda(&program_id).0.to_string(),
    }));
    Ok(())
}

pub async fn handle_global(
    command: GlobalCommands,
    rpc_client: &Arc<RpcClient>,
    config: &Config,
) -> L2Result<()> {
    let program_id = config.program_id()?;

    match command {
        GlobalCommands::Show => {
            let global = fetch_global(rpc_client, &program_id).await?;
            print_json(&global.to_json());
        }
        GlobalCommands::Init { payer, mint, hour } => {
            let payer = KeypairUtil::from_private_key_string(&payer)?;
            let mint = parse_pubkey("--mint", &mint)?;
            let switchboard = SwitchboardAccounts::load(rpc_client, config).await?;
            let hour = hour.unwrap_or(config.setup.hour_to_next_update);

            let global =
                initialize_global(rpc_client, &program_id, &payer, &mint, &switchboard, hour)
                    .await?;
            print_json(&global.to_json());
        }
        GlobalCommands::Watch { wait_ms } => {
            let wait =
                wait_ms.map(Duration::from_millis).unwrap_or_else(|| config.setup.trigger_wait());
            let observation = wait_for_trigger(rpc_client, &program_id, wait).await?;
            print_json(&observation_json(&observation));
        }
    }
    Ok(())
}

pub async fn handle_burn(
    command: BurnCommands,
    rpc_client: &Arc<RpcClient>,
    config: &Config,
) -> L2Result<()> {
    let program_id = config.program_id()?;

    let (payer, mint, sources) = match command {
        BurnCommands::FromMint { payer, mint } => (payer, mint, Vec::new()),
        BurnCommands::FromAccounts { payer, mint, sources } => {
            let sources = sources
                .iter()
                .map(|source| parse_pubkey("--source", source))
                .collect::<L2Result<Vec<_>>>()?;
            (payer, mint, sources)
        }
    };

    let payer = KeypairUtil::from_private_key_string(&payer)?;
    let mint = resolve_mint(rpc_client, &program_id, mint).await?;

    let signature = collect_and_burn(rpc_client, &program_id, &payer, &mint, &sources).await?;
    println!("{signature}");
    Ok(())
}

pub async fn handle_crank(
    command: CrankCommands,
    rpc_client: &Arc<RpcClient>,
    config: &Config,
) -> L2Result<()> {
    match command {
        CrankCommands::Trigger { enclave_signer, request } => {
            let enclave_signer = KeypairUtil::from_private_key_string(&enclave_signer)?;
            let request = parse_pubkey("--request", &request)?;

            let signature = crank_trigger(rpc_client, config, &enclave_signer, &request).await?;
            println!("{signature}");
        }
    }
    Ok(())
}

pub fn handle_params(command: ParamsCommands, config: &Config) -> L2Result<()> {
    match command {
        ParamsCommands::Encode { program_id, max_value, mint } => {
            let program_id = match program_id {
                Some(program_id) => parse_pubkey("--program-id", &program_id)?,
                None => config.program_id()?,
            };
            let params = ContainerParams {
                program_id,
                max_value,
                global: get_global_pda(&program_id).0,
                mint: parse_pubkey("--mint", &mint)?,
            };
            println!("{params}");
        }
        ParamsCommands::Decode { params } => {
            let params = ContainerParams::decode(params.as_bytes())?;
            print_json(&json!({
                "program_id": params.program_id.to_string(),
                "max_value": params.max_value,
                "global": params.global.to_string(),
                "mint": params.mint.to_string(),
            }));
        }
    }
    Ok(())
}
