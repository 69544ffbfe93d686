//! Top-level interactive menu.

use crate::api::BitbucketApi;
use crate::config::{self, ConfigStore};
use crate::error::Result;
use crate::output::{BLUE, RESET};
use crate::prompt::Prompt;
use crate::repository::{manage_repositories, resolve_repository};
use crate::workflow;

/// Why the menu loop returned.
pub enum MenuOutcome {
    Exit,
    /// Credentials were re-entered; the caller rebuilds the API client and
    /// re-enters the menu.
    Reconfigured,
}

/// Run the main menu until the operator exits or reconfigures.
pub fn run(
    api: &dyn BitbucketApi,
    prompt: &dyn Prompt,
    store: &mut ConfigStore,
) -> Result<MenuOutcome> {
    let actions: Vec<String> = [
        "List pull requests",
        "Create pull requests",
        "Select repository",
        "Configure CLI",
        "Exit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    loop {
        match prompt.select("What would you like to do?", &actions)? {
            0 => {
                if let Some(repo) = resolve_repository(prompt, store)? {
                    workflow::list_and_merge(api, prompt, &repo)?;
                }
                if !return_to_menu(prompt)? {
                    return Ok(MenuOutcome::Exit);
                }
            }
            1 => {
                if let Some(repo) = resolve_repository(prompt, store)? {
                    workflow::create_pull_requests(api, prompt, store, &repo)?;
                }
                if !return_to_menu(prompt)? {
                    return Ok(MenuOutcome::Exit);
                }
            }
            2 => manage_repositories(prompt, store)?,
            3 => {
                config::setup(prompt, store)?;
                return Ok(MenuOutcome::Reconfigured);
            }
            _ => {
                goodbye();
                return Ok(MenuOutcome::Exit);
            }
        }
    }
}

fn return_to_menu(prompt: &dyn Prompt) -> Result<bool> {
    let back = prompt.confirm("Return to main menu?", true)?;
    if !back {
        goodbye();
    }
    Ok(back)
}

fn goodbye() {
    println!("{BLUE}Goodbye!{RESET}");
}
