//! Serve command - run the DevCard web page

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use devcard_core::Config;
use devcard_github::GitHubClient;
use devcard_web::AppState;

/// Serve the DevCard web page
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(short, long, env = "DEVCARD_BIND")]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, client: GitHubClient, config: &Config) -> anyhow::Result<()> {
        let config = config.clone().with_cli_overrides(self.bind.clone(), None);
        let addr: SocketAddr = config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", config.server.bind))?;

        let state = AppState::new(Arc::new(client), config.card.clone());

        println!("Serving DevCard on http://{}", addr);
        devcard_web::serve(addr, state)
            .await
            .context("Web server failed")?;

        Ok(())
    }
}
