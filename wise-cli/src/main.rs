//! Wise CLI
//!
//! Command-line access to the same operations the MCP server exposes.

use anyhow::Result;
use clap::{Parser, Subcommand, builder::BoolishValueParser};

use wise_client::{Environment, WiseClient, WiseConfig};
use wise_hex::WiseService;
use wise_types::{Currency, ProfileId, ProfileType, RecipientId, SendMoneyRequest};

#[derive(Parser)]
#[command(name = "wise")]
#[command(author, version, about = "Wise money-movement CLI", long_about = None)]
struct Cli {
    /// Wise API token
    #[arg(long, env = "WISE_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Use the sandbox environment
    #[arg(
        long,
        env = "WISE_IS_SANDBOX",
        default_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    sandbox: bool,

    /// Override the API base URL
    #[arg(long, env = "WISE_API_URL")]
    api_url: Option<String>,

    /// Profile type used when a command needs one
    #[arg(long, env = "WISE_DEFAULT_PROFILE_TYPE", default_value = "personal")]
    profile_type: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Recipient operations
    Recipient {
        #[command(subcommand)]
        action: RecipientCommands,
    },
    /// Quote, create, and fund a transfer
    Send {
        /// Recipient ID
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: f64,
        /// Source currency
        #[arg(long)]
        from: String,
        /// Target currency
        #[arg(long)]
        to: String,
        #[arg(long)]
        reference: Option<String>,
        #[arg(long)]
        source_of_funds: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List all profiles
    List,
    /// Get profile details
    Get {
        /// Profile ID
        id: String,
    },
}

#[derive(Subcommand)]
enum RecipientCommands {
    /// List recipients of the selected profile
    List {
        #[arg(long)]
        currency: Option<String>,
    },
    /// Find the recipient whose name best matches
    Find {
        /// Name to look for
        name: String,
        #[arg(long)]
        currency: Option<String>,
    },
}

fn parse_profile_type(s: &str) -> Result<ProfileType> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid profile type: {}. Supported: personal, business", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = WiseConfig::new(cli.api_token, Environment::from_sandbox_flag(cli.sandbox));
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    let service = WiseService::new(WiseClient::new(config)?);
    let profile_type = parse_profile_type(&cli.profile_type)?;

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileCommands::List => {
                let profiles = service.list_profiles().await?;
                println!("{}", serde_json::to_string_pretty(&profiles)?);
            }
            ProfileCommands::Get { id } => {
                let profile = service.get_profile(&ProfileId::new(id)).await?;
                println!("{}", serde_json::to_string_pretty(&profile)?);
            }
        },

        Commands::Recipient { action } => match action {
            RecipientCommands::List { currency } => {
                let recipients = service
                    .list_recipients(profile_type, currency.map(Currency::new))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&recipients)?);
            }
            RecipientCommands::Find { name, currency } => {
                let found = service
                    .find_recipient(profile_type, &name, currency.map(Currency::new))
                    .await?;
                println!("{}", serde_json::to_string_pretty(&found)?);
            }
        },

        Commands::Send {
            recipient,
            amount,
            from,
            to,
            reference,
            source_of_funds,
        } => {
            let profile = service.resolve_profile(profile_type).await?;
            let result = service
                .send_money(SendMoneyRequest {
                    profile_id: profile.id,
                    source_currency: Currency::new(from),
                    target_currency: Currency::new(to),
                    source_amount: amount,
                    recipient_id: RecipientId::new(recipient),
                    reference,
                    source_of_funds,
                    funding_method: None,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_completed() {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
