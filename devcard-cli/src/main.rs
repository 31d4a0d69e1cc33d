//! DevCard CLI - Command line interface for DevCard
//!
//! Fetch a GitHub user's profile, languages and featured repositories and
//! render them as a card in the terminal, as HTML, as JSON, or over HTTP.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use devcard_core::{Config, Secrets};
use devcard_github::GitHubClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{PromptArgs, ServeArgs, ShowArgs};

/// DevCard: GitHub profile cards
#[derive(Parser, Debug)]
#[command(name = "devcard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (defaults to ~/.config/devcard/config.toml)
    #[arg(long, global = true, env = "DEVCARD_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub token (overrides GITHUB_PAT and the secrets file)
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Fetch and render a user's DevCard
    #[command(visible_alias = "s")]
    Show(ShowArgs),

    /// Serve the DevCard web page
    Serve(ServeArgs),

    /// Enter usernames interactively
    Prompt(PromptArgs),

    /// Show current configuration
    Config,

    /// Create a secrets file template for your GitHub token
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered cards on stdout stay clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = Config::load_with_overrides(cli.config.as_deref(), None, None)
        .context("Failed to load configuration")?;

    if cli.verbose {
        tracing::info!(
            api_url = %config.github.api_url,
            top_languages = config.card.top_languages,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("devcard {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Show(ref args)) => {
            let client = github_client(cli.token.clone(), &config)?;
            args.execute(client, &config).await?;
        }
        Some(Commands::Serve(ref args)) => {
            let client = github_client(cli.token.clone(), &config)?;
            args.execute(client, &config).await?;
        }
        Some(Commands::Prompt(ref args)) => {
            let client = github_client(cli.token.clone(), &config)?;
            args.execute(client, &config).await?;
        }
        Some(Commands::Config) => print_config(&config, cli.config.as_deref()),
        Some(Commands::Init) => {
            let path = Secrets::create_template().context("Failed to create secrets file")?;
            println!("Created {}", path.display());
            println!("Add your GitHub token there, or set GITHUB_TOKEN.");
        }
        None => {
            println!("DevCard - GitHub profile cards");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn github_client(token: Option<String>, config: &Config) -> anyhow::Result<GitHubClient> {
    let client = match token.filter(|t| !t.trim().is_empty()) {
        Some(token) => GitHubClient::new(&config.github, Some(token.trim().to_string())),
        None => GitHubClient::from_env(config),
    };
    client.context("Failed to create GitHub client")
}

fn print_config(config: &Config, explicit: Option<&std::path::Path>) {
    println!("DevCard Configuration");
    println!("=====================");
    println!();
    println!("GitHub:");
    println!("  api_url: {}", config.github.api_url);
    println!("  graphql_url: {}", config.github.graphql_url);
    println!("  timeout: {:?}", config.github.timeout);
    println!();
    println!("Card:");
    println!("  top_languages: {}", config.card.top_languages);
    println!("  shown_languages: {}", config.card.shown_languages);
    println!("  featured_repos: {}", config.card.featured_repos);
    println!("  max_repos: {}", config.card.max_repos);
    println!("  include_forks: {}", config.card.include_forks);
    println!("  language_concurrency: {}", config.card.language_concurrency);
    println!();
    println!("Server:");
    println!("  bind: {}", config.server.bind);
    println!();

    let path = explicit
        .map(|p| p.to_path_buf())
        .or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }

    let token = Secrets::load().ok().and_then(|s| s.github_token());
    println!(
        "GitHub token: {}",
        if token.is_some() { "configured" } else { "not set" }
    );
}
