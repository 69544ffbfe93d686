//! Saved-repository list: resolving the workflow target and the manage
//! submenu.

use crate::config::ConfigStore;
use crate::error::Result;
use crate::output::{print_error, print_info, print_warning, BLUE, GREEN, RESET, YELLOW};
use crate::prompt::Prompt;

const ADD_NEW: &str = "Add new repository";

/// Resolve which repository the next operation targets.
///
/// Picks from the saved list (plus an add-new entry); with nothing saved
/// yet the operator is sent through the manage submenu first. `None` means
/// no repository could be resolved and the caller returns to the menu.
pub fn resolve_repository(
    prompt: &dyn Prompt,
    store: &mut ConfigStore,
) -> Result<Option<String>> {
    if store.config.repos.is_empty() {
        print_warning("No repositories saved. Please add one.");
        manage_repositories(prompt, store)?;
        if store.config.repos.is_empty() {
            return Ok(None);
        }
    }

    let mut options = store.config.repos.clone();
    options.push(ADD_NEW.to_string());

    let picked = prompt.select("Select a repository:", &options)?;
    if picked == options.len() - 1 {
        return add_repository(prompt, store);
    }
    Ok(Some(options[picked].clone()))
}

/// Repository management submenu: list, add, remove, back.
pub fn manage_repositories(prompt: &dyn Prompt, store: &mut ConfigStore) -> Result<()> {
    let actions: Vec<String> = [
        "List saved repositories",
        "Add repository",
        "Remove repository",
        "Go back",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    loop {
        match prompt.select("Manage repositories:", &actions)? {
            0 => {
                if store.config.repos.is_empty() {
                    print_info("No repositories saved.");
                } else {
                    println!("{BLUE}Saved repositories:{RESET}");
                    for (i, repo) in store.config.repos.iter().enumerate() {
                        println!("{}. {}", i + 1, repo);
                    }
                }
            }
            1 => {
                add_repository(prompt, store)?;
            }
            2 => remove_repository(prompt, store)?,
            _ => return Ok(()),
        }
    }
}

fn add_repository(prompt: &dyn Prompt, store: &mut ConfigStore) -> Result<Option<String>> {
    let name = prompt.input("Enter new repository name")?;
    if store.config.repos.contains(&name) {
        print_warning(&format!("Repository \"{}\" is already saved.", name));
        return Ok(Some(name));
    }

    store.config.repos.push(name.clone());
    store.save()?;
    println!("{GREEN}Repository \"{}\" added.{RESET}", name);
    Ok(Some(name))
}

fn remove_repository(prompt: &dyn Prompt, store: &mut ConfigStore) -> Result<()> {
    if store.config.repos.is_empty() {
        print_error("No repositories saved.");
        return Ok(());
    }

    let repos = store.config.repos.clone();
    let picked = prompt.select("Select a repository to remove:", &repos)?;
    let removed = repos[picked].clone();

    store.config.repos.retain(|repo| repo != &removed);
    store.save()?;
    println!("{YELLOW}Repository \"{}\" removed.{RESET}", removed);
    Ok(())
}
