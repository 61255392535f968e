//! dartlens main entry point

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use dartlens_api::start_server;
use dartlens_config::Config;
use dartlens_core::{load_statement_file, Analyzer, Period};
use dartlens_parser::{DefaultNarrativeParser, NarrativeParserTrait};

#[derive(Parser, Debug)]
#[command(name = "dartlens")]
#[command(version = "0.1.0")]
#[command(about = "Financial statement analysis and investment report rendering", long_about = None)]
struct Args {
    /// Configuration file path (defaults apply when it does not exist)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Analyze a statement file (filings API response or row array) and print JSON
    Analyze {
        file: PathBuf,
        /// current, prior, prior_prior (or 당기, 전기, 전전기)
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Parse a narrative report and print its document tree as JSON
    Narrative { file: PathBuf },
    /// Write the default configuration file
    InitConfig {
        #[arg(default_value = "config.yaml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(config: &Config) {
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load_or_default(&args.config)
        .map_err(|e| anyhow!(e.to_details().to_string()))?;
    init_logging(&config);
    if args.config.exists() {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::info!("No config at {}, using defaults", args.config.display());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(args.command, config))
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::Serve => {
            start_server(config).await.context("server failed")?;
        }
        Command::Analyze { file, period } => {
            let period = period.map(|name| name.parse::<Period>()).transpose()?;
            let items = load_statement_file(&file)
                .await
                .with_context(|| format!("failed to load {}", file.display()))?;

            let analyzer = Analyzer::new(config.analysis.clone());
            let output = serde_json::json!({
                "analysis": analyzer.analyze(&items, period),
                "digest": analyzer.digest(&items),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Narrative { file } => {
            let parser = DefaultNarrativeParser;
            let document = parser
                .parse_file(file.clone())
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            log::info!(
                "Parsed {} sections, grade {:?}",
                document.section_titles().len(),
                document.grade()
            );
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Command::InitConfig { output, force } => {
            if output.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", output.display());
            }
            std::fs::write(&output, Config::generate_default())?;
            log::info!("Wrote default configuration to {}", output.display());
        }
    }
    Ok(())
}
