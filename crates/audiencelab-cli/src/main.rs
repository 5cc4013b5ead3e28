mod audiences;
mod render;
mod research;

use audiencelab_gateway::{GeminiClient, ResearchGateway};
use audiencelab_store::{AudienceStore, FileBlobStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::audiences::AudiencesCommands;
use crate::research::ResearchCommands;

#[derive(Debug, Parser)]
#[command(name = "audiencelab")]
#[command(about = "AudienceLab market research command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage saved audience profiles
    Audiences {
        #[command(subcommand)]
        command: AudiencesCommands,
    },
    /// Run grounded research questions against the Gemini API
    Research {
        #[command(subcommand)]
        command: ResearchCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = audiencelab_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("audiencelab: run `audiencelab --help` to see available commands");
        return Ok(());
    };

    tracing::debug!(env = %config.env, data_dir = %config.data_dir.display(), "starting");
    let store = AudienceStore::new(FileBlobStore::new(config.data_dir.clone()));

    match command {
        Commands::Audiences { command } => audiences::run_audiences(&store, &config, command),
        Commands::Research { command } => {
            let client = GeminiClient::from_config(&config)?;
            tracing::debug!(
                model = client.model(),
                has_api_key = client.has_api_key(),
                "gemini client ready"
            );
            let gateway = ResearchGateway::new(client);
            research::run_research(&store, &gateway, command).await
        }
    }
}
