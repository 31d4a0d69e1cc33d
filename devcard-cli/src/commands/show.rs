//! Show command - fetch a DevCard and print it

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use devcard_core::render::{html, text};
use devcard_core::{Config, DevCardLoader, Username};
use devcard_github::GitHubClient;

/// Fetch and render a user's DevCard
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// GitHub username, @handle or profile URL
    pub username: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of ranked languages (overrides config)
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text card
    Text,
    /// Standalone HTML page
    Html,
    /// JSON document
    Json,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, client: GitHubClient, config: &Config) -> anyhow::Result<()> {
        let username = Username::parse(&self.username)?;
        let config = config.clone().with_cli_overrides(None, self.top);

        let loader = DevCardLoader::new(client, config.card.clone());
        let card = loader
            .load(&username)
            .await
            .with_context(|| format!("Failed to fetch DevCard for {}", username))?;

        let rendered = match self.format {
            OutputFormat::Text => text::card(&card, &config.card),
            OutputFormat::Html => html::document(
                &format!("{} - DevCard", card.profile.display_name()),
                &format!(
                    "<section id=\"devcard\">{}</section>",
                    html::card(&card, &config.card)
                ),
            ),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(&card)?;
                json.push('\n');
                json
            }
        };

        match self.output {
            Some(ref path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Wrote {}", path.display());
            }
            None => print!("{}", rendered),
        }

        Ok(())
    }
}
