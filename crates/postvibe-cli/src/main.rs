mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postvibe")]
#[command(about = "Multi-modal sentiment analysis for social-media posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score every post in a posts file and summarize the batch
    Analyze {
        /// Posts JSON file; defaults to `POSTVIBE_POSTS_PATH`
        #[arg(long)]
        posts: Option<PathBuf>,

        /// Fusion config YAML; replaces the env-derived fusion settings entirely
        #[arg(long)]
        fusion_config: Option<PathBuf>,

        /// Print a JSON report instead of the text summary
        #[arg(long)]
        json: bool,

        /// How many keywords and hashtags to report
        #[arg(long, default_value_t = 15)]
        top: usize,
    },
    /// Print the effective fusion configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = postvibe_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Analyze {
            posts,
            fusion_config,
            json,
            top,
        }) => {
            let args = analyze::AnalyzeArgs {
                posts,
                fusion_config,
                json,
                top,
            };
            analyze::run_analyze(&config, args).await?;
        }
        Some(Commands::Config) => {
            println!("# environment: {}", config.env);
            println!("# max concurrent posts: {}", config.max_concurrent_posts);
            println!("# scorer timeout: {}ms", config.scorer_timeout_ms);
            print!("{}", serde_yaml::to_string(&config.fusion)?);
        }
        None => println!("postvibe ready; run `postvibe --help` for commands"),
    }

    Ok(())
}
