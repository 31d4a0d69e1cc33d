//! Prompt command - interactive username entry
//!
//! Each line read from stdin is a form submission. Fetches run in the
//! background; only the result for the latest submission is shown.

use std::io::Write;
use std::sync::Arc;

use clap::Args;
use devcard_core::render::text;
use devcard_core::{Config, DevCard, DevCardLoader, FetchTicket, PageState, ProfileForm};
use devcard_github::GitHubClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

type Completion = (FetchTicket, devcard_core::Result<DevCard>);

/// Enter usernames interactively
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Hide the input prompt (useful when piping usernames in)
    #[arg(long)]
    pub quiet: bool,
}

impl PromptArgs {
    /// Execute the prompt command
    pub async fn execute(&self, client: GitHubClient, config: &Config) -> anyhow::Result<()> {
        let loader = Arc::new(DevCardLoader::new(client, config.card.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut form = ProfileForm::new();

        self.print_prompt()?;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let line = line.trim();
                    if matches!(line, "quit" | "exit") {
                        break;
                    }

                    form.set_input(line);
                    match form.submit() {
                        Some(ticket) => {
                            print!("{}", text::skeleton(ticket.username().as_str()));
                            let loader = Arc::clone(&loader);
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let result = loader.load(ticket.username()).await;
                                let _ = tx.send((ticket, result));
                            });
                        }
                        None => {
                            let rejected = form.state().error().filter(|_| !line.is_empty());
                            if let Some(message) = rejected {
                                print!("{}", text::error_panel(message));
                            }
                            self.print_prompt()?;
                        }
                    }
                }
                Some((ticket, result)) = rx.recv() => {
                    if form.complete(ticket, result) {
                        render(&form, config);
                        self.print_prompt()?;
                    }
                }
            }
        }

        // Input closed: let the latest fetch finish before exiting
        drop(tx);
        while form.state().is_loading() {
            match rx.recv().await {
                Some((ticket, result)) => {
                    if form.complete(ticket, result) {
                        render(&form, config);
                    }
                }
                None => break,
            }
        }

        Ok(())
    }

    fn print_prompt(&self) -> std::io::Result<()> {
        if !self.quiet {
            print!("username> ");
            std::io::stdout().flush()?;
        }
        Ok(())
    }
}

fn render(form: &ProfileForm, config: &Config) {
    match form.state() {
        PageState::Ready(card) => print!("{}", text::card(card, &config.card)),
        PageState::Failed { message } => print!("{}", text::error_panel(message)),
        PageState::Idle | PageState::Loading { .. } => {}
    }
}
