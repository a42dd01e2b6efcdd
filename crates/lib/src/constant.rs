// Programs
pub const L2_PROGRAM_ID: &str = "auULn3TunUFz5mvM1VSLUT184oAApgnEsLmqZrVyUAP";
pub const SWITCHBOARD_ATTESTATION_PROGRAM_ID: &str = "sbattyXrzedoNATfc4L31wC9Mhxsi1BmFhTiN8gDshx";

// PDA seeds
pub const GLOBAL_SEED: &[u8] = b"global";
pub const ATTESTATION_STATE_SEED: &[u8] = b"STATE";

// Program constants mirrored from the L2 program
pub const HOURLY_SLOTS: u16 = 9000; // ~1 hour at 400 ms/slot
pub const MAX_RAND_VALUE: u8 = 254;
pub const FULL_TRANSFER_FEE_BP: u16 = 100_00;

// Account / instruction names used for anchor discriminators
pub const GLOBAL_ACCOUNT_NAME: &str = "Global";
pub mod instruction_names {
    pub const INIT_GLOBAL: &str = "init_global";
    pub const TRIGGER_UPDATE: &str = "trigger_update";
    pub const COLLECT_AND_BURN_FROM_ACCOUNT: &str = "collect_and_burn_from_account";
    pub const COLLECT_AND_BURN_FROM_MINT: &str = "collect_and_burn_from_mint";
}

// Cluster
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_CONFIG_PATH: &str = "l2.toml";
pub const DEFAULT_LOG_FORMAT: &str = "standard";

// Environment setup
pub const DEFAULT_HOUR_TO_NEXT_UPDATE: u8 = 48;
pub const DEFAULT_MINT_DECIMALS: u8 = 9;
pub const DEFAULT_MAXIMUM_FEE: u64 = 0;
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = 1_000_000_000; // 1 SOL
pub const DEFAULT_USER_FUND_LAMPORTS: u64 = 100_000_000; // 0.1 SOL
pub const DEFAULT_MINT_AMOUNT: u64 = 10_000_00;
pub const DEFAULT_TRIGGER_WAIT_MS: u64 = 10_000;

// Confirmation polling
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 500;
pub const MAX_CONFIRMATION_POLLS: usize = 120;

pub const MR_ENCLAVE_LEN: usize = 32;
