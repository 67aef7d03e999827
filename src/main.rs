use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod account;
mod extractor;
mod fetcher;
mod grid;
mod render;
mod report;
mod stats;

use account::AccountStore;
use fetcher::{FetchConfig, PageFetcher, DEFAULT_TIMEOUT_SECS};
use report::Report;

#[derive(Parser)]
#[command(name = "cgraph")]
#[command(about = "Show a GitHub contribution graph in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the graph for a username without remembering it
    Check {
        /// GitHub username
        name: Option<String>,
    },

    /// Show the graph for the remembered username (asks once)
    Checkme,

    /// Forget the remembered username and ask for a new one
    Change,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            render::print_banner();
            return Ok(());
        }
    };

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let account = match cli.command {
        None => {
            render::print_banner();
            return Ok(());
        }
        Some(Commands::Check { name: None }) => {
            println!("usage: cgraph check <github username>");
            return Ok(());
        }
        Some(Commands::Check { name: Some(name) }) => name,
        Some(Commands::Checkme) => AccountStore::default_location()?.load_or_prompt()?,
        Some(Commands::Change) => {
            let store = AccountStore::default_location()?;
            store.clear()?;
            info!("Forgot remembered username ({})", store.path().display());
            store.load_or_prompt()?
        }
    };

    let fetcher = PageFetcher::new(FetchConfig::default().with_timeout(cli.timeout))?;
    let page = fetcher.fetch(&account).await?;

    let today = stats::today_label();
    let report = Report::from_page(&account, &page, &today);

    print!("{}", render::render_report(&report));

    Ok(())
}
