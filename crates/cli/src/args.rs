use clap::Parser;
use l2_lib::{
    constant::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_FORMAT},
    log::LoggingFormat,
};

/// Global arguments used by all subcommands
#[derive(Debug, Parser)]
#[command(name = "l2")]
pub struct GlobalArgs {
    /// Solana RPC endpoint URL, overrides `cluster.rpc_url`
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Path to the harness configuration file (TOML format)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log output format
    #[arg(long, value_enum, default_value = DEFAULT_LOG_FORMAT)]
    pub logging_format: LoggingFormat,
}
