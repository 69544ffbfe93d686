//! bbpr CLI entry point.
//!
//! Parses the one flag, ensures credentials exist, then hands control to
//! the interactive menu.

use bbpr::api::BitbucketClient;
use bbpr::config::{self, ConfigStore};
use bbpr::menu::{self, MenuOutcome};
use bbpr::output::print_error;
use bbpr::prompt::TermPrompt;
use bbpr::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "bbpr")]
#[command(version, about = "Interactive CLI for Bitbucket Cloud pull requests")]
struct Cli {
    /// Re-run the credential and workspace setup before showing the menu
    #[arg(short, long)]
    configure: bool,
}

fn main() {
    if let Err(e) = run() {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let prompt = TermPrompt::new();
    let mut store = ConfigStore::open()?;

    if cli.configure || !store.config.is_configured() {
        config::setup(&prompt, &mut store)?;
    }

    loop {
        let client = BitbucketClient::new(&store.config)?;
        match menu::run(&client, &prompt, &mut store)? {
            MenuOutcome::Exit => return Ok(()),
            // Rebuild the client so new credentials take effect immediately.
            MenuOutcome::Reconfigured => continue,
        }
    }
}
