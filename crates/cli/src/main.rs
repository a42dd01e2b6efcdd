mod args;
mod commands;

use args::GlobalArgs;
use clap::{Parser, Subcommand};
use l2_lib::{
    constant::MAX_RAND_VALUE, error::L2Error, log::setup_logging, rpc::get_rpc_client,
    sanitize::sanitize_message, Config,
};

#[derive(Subcommand)]
enum Commands {
    /// Run the full scenario: oracle accounts, environment, init_global, trigger window
    Run,
    /// Fund fresh test keys and create the transfer-fee mint
    SetupEnv,
    /// Global account operations
    Global {
        #[command(subcommand)]
        global_command: GlobalCommands,
    },
    /// Collect withheld transfer fees into the global token account and burn them
    Burn {
        #[command(subcommand)]
        burn_command: BurnCommands,
    },
    /// Oracle function operations
    Crank {
        #[command(subcommand)]
        crank_command: CrankCommands,
    },
    /// Encode or decode function request container params
    Params {
        #[command(subcommand)]
        params_command: ParamsCommands,
    },
}

#[derive(Subcommand)]
pub enum GlobalCommands {
    /// Fetch and print the Global account
    Show,
    /// Initialize the Global account and verify the result
    Init {
        /// Payer keypair (base58, [u8] array, or keypair file path)
        #[arg(long, env = "L2_PAYER")]
        payer: String,

        /// Transfer-fee mint whose fee authority is the global PDA
        #[arg(long)]
        mint: String,

        /// Hours until the first update (defaults to `setup.hour_to_next_update`)
        #[arg(long)]
        hour: Option<u8>,
    },
    /// Snapshot Global, wait, and snapshot it again
    Watch {
        /// Wait between snapshots in milliseconds (defaults to `setup.trigger_wait_ms`)
        #[arg(long)]
        wait_ms: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum BurnCommands {
    /// Collect fees withheld on the mint
    FromMint {
        #[arg(long, env = "L2_PAYER")]
        payer: String,

        /// Mint to collect from (defaults to the mint stored in Global)
        #[arg(long)]
        mint: Option<String>,
    },
    /// Collect fees withheld on token accounts
    FromAccounts {
        #[arg(long, env = "L2_PAYER")]
        payer: String,

        #[arg(long)]
        mint: Option<String>,

        /// Token accounts holding withheld fees
        #[arg(long = "source", required = true)]
        sources: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum CrankCommands {
    /// Submit the trigger_update the oracle function would emit
    Trigger {
        /// Enclave signer keypair registered for the function
        #[arg(long, env = "L2_ENCLAVE_SIGNER")]
        enclave_signer: String,

        /// Function request account created by init_global
        #[arg(long)]
        request: String,
    },
}

#[derive(Subcommand)]
pub enum ParamsCommands {
    /// Print the container params init_global attaches to its request
    Encode {
        /// Program id (defaults to `program.program_id`)
        #[arg(long)]
        program_id: Option<String>,

        #[arg(long, default_value_t = MAX_RAND_VALUE)]
        max_value: u8,

        #[arg(long)]
        mint: String,
    },
    /// Parse a container params string
    Decode { params: String },
}

#[derive(Parser)]
#[command(author, version, about = "L2 - transfer-fee schedule harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[tokio::main]
async fn main() -> Result<(), L2Error> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(&cli.global_args.logging_format);

    let config = Config::load_or_default(&cli.global_args.config).unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {e}"));
        std::process::exit(1);
    });

    let rpc_url =
        cli.global_args.rpc_url.clone().unwrap_or_else(|| config.cluster.rpc_url.clone());
    tracing::debug!("Using RPC endpoint {}", sanitize_message(&rpc_url));
    let rpc_client = get_rpc_client(&rpc_url);

    let result = match cli.command {
        Some(Commands::Run) => commands::run(&rpc_client, &config).await,
        Some(Commands::SetupEnv) => commands::setup_env(&rpc_client, &config).await,
        Some(Commands::Global { global_command }) => {
            commands::handle_global(global_command, &rpc_client, &config).await
        }
        Some(Commands::Burn { burn_command }) => {
            commands::handle_burn(burn_command, &rpc_client, &config).await
        }
        Some(Commands::Crank { crank_command }) => {
            commands::handle_crank(crank_command, &rpc_client, &config).await
        }
        Some(Commands::Params { params_command }) => {
            commands::handle_params(params_command, &config)
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            println!("Available commands:");
            println!("  run          - Full scenario against the configured cluster");
            println!("  setup-env    - Fund test keys and create the transfer-fee mint");
            println!("  global       - Show, init or watch the Global account");
            println!("  burn         - Collect and burn withheld transfer fees");
            println!("  crank        - Submit trigger_update as the oracle function");
            println!("  params       - Encode or decode container params");
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn print_error(message: &str) {
    eprintln!("Error: {message}");
}
