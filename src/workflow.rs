//! Pull request workflows: the multi-step create flow and the list/merge
//! flow.
//!
//! The create flow runs fresh on every invocation: resolve a source branch
//! (reuse the saved one or pick from a freshly fetched list), resolve the
//! destination set (reuse the saved set verbatim or multi-select from the
//! same list minus the source), persist both back to the config, then
//! create one pull request per destination. Batches are strictly
//! sequential and best-effort: a failed create or merge is reported and
//! the rest of the batch still runs.

use crate::api::types::{CreatePullRequest, PullRequest};
use crate::api::BitbucketApi;
use crate::branch::BranchCache;
use crate::config::ConfigStore;
use crate::error::Result;
use crate::output::{format_pr_line, print_error, print_info, print_warning, Spinner, BOLD, RESET};
use crate::prompt::Prompt;

/// The "create pull request(s)" flow for one repository.
pub fn create_pull_requests(
    api: &dyn BitbucketApi,
    prompt: &dyn Prompt,
    store: &mut ConfigStore,
    repo: &str,
) -> Result<()> {
    let mut cache = BranchCache::new();

    let source = match resolve_source(api, prompt, store, repo, &mut cache)? {
        Some(source) => source,
        None => return Ok(()),
    };

    let destinations =
        match resolve_destinations(api, prompt, store, repo, &source, &mut cache)? {
            Some(destinations) => destinations,
            None => return Ok(()),
        };

    // Checkpoint: remember this run's selections before creating anything.
    store.config.remember_branches(repo, &source, &destinations);
    store.save()?;

    for destination in &destinations {
        create_one(api, repo, &source, destination);
    }

    Ok(())
}

/// Resolve the source branch. `None` means the flow was aborted because no
/// branches could be fetched.
fn resolve_source(
    api: &dyn BitbucketApi,
    prompt: &dyn Prompt,
    store: &ConfigStore,
    repo: &str,
    cache: &mut BranchCache,
) -> Result<Option<String>> {
    if let Some(saved) = store.config.source_branch_for(repo) {
        let saved = saved.to_string();
        let reuse = prompt.confirm(
            &format!("Re-use the saved source branch '{}'?", saved),
            true,
        )?;
        if reuse {
            // Saved value taken as-is; the branch list is not fetched.
            return Ok(Some(saved));
        }
    }

    let branches = match fetch_with_spinner(api, repo, cache) {
        Some(branches) => branches,
        None => return Ok(None),
    };
    let picked = prompt.select("Select source branch:", &branches)?;
    Ok(Some(branches[picked].clone()))
}

/// Resolve the destination set. `None` aborts, same rule as the source.
fn resolve_destinations(
    api: &dyn BitbucketApi,
    prompt: &dyn Prompt,
    store: &ConfigStore,
    repo: &str,
    source: &str,
    cache: &mut BranchCache,
) -> Result<Option<Vec<String>>> {
    if let Some(saved) = store.config.destination_branches_for(repo) {
        let saved = saved.to_vec();
        let reuse = prompt.confirm(
            &format!(
                "Re-use the saved destination branches?\n - {}",
                saved.join("\n - ")
            ),
            true,
        )?;
        if reuse {
            // The saved set is taken verbatim, no re-selection.
            return Ok(Some(saved));
        }
    }

    let branches = match fetch_with_spinner(api, repo, cache) {
        Some(branches) => branches,
        None => return Ok(None),
    };

    let options: Vec<String> = branches
        .iter()
        .filter(|branch| branch.as_str() != source)
        .cloned()
        .collect();
    if options.is_empty() {
        print_error("No destination branches available.");
        return Ok(None);
    }

    let picked = loop {
        let picked = prompt.multi_select("Select destination branch(es):", &options)?;
        if picked.is_empty() {
            print_warning("Select at least one destination branch.");
            continue;
        }
        break picked;
    };

    Ok(Some(picked.into_iter().map(|i| options[i].clone()).collect()))
}

/// Fetch the branch list through the session cache, reporting the
/// empty-list abort.
fn fetch_with_spinner(
    api: &dyn BitbucketApi,
    repo: &str,
    cache: &mut BranchCache,
) -> Option<Vec<String>> {
    let spinner = Spinner::new("Fetching branches...");
    let branches = cache.get(api, repo).to_vec();
    if branches.is_empty() {
        spinner.fail("No branches found.");
        return None;
    }
    spinner.succeed(&format!("Fetched {} branches", branches.len()));
    Some(branches)
}

fn create_one(api: &dyn BitbucketApi, repo: &str, source: &str, destination: &str) {
    let spinner = Spinner::new(&format!("Creating PR from {} to {}...", source, destination));
    let body = CreatePullRequest::new(source, destination);
    match api.create_pull_request(repo, &body) {
        Ok(link) => spinner.succeed(&format!("PR created: {}", link)),
        Err(e) => {
            spinner.fail(&format!(
                "Failed to create PR from {} to {}",
                source, destination
            ));
            print_error(&e.to_string());
        }
    }
}

/// List open pull requests and merge a selected batch.
pub fn list_and_merge(api: &dyn BitbucketApi, prompt: &dyn Prompt, repo: &str) -> Result<()> {
    let spinner = Spinner::new("Fetching pull requests...");
    let prs = match api.list_pull_requests(repo, "OPEN") {
        Ok(prs) => {
            spinner.succeed("Pull requests fetched");
            prs
        }
        Err(e) => {
            spinner.fail("Failed to fetch pull requests");
            print_error(&e.to_string());
            return Ok(());
        }
    };

    if prs.is_empty() {
        print_info("No open pull requests found.");
        return Ok(());
    }

    println!("\n{BOLD}Open pull requests for {}:{RESET}", repo);
    for pr in &prs {
        println!("{}", format_pr_line(pr));
    }
    println!();

    let options: Vec<String> = prs.iter().map(format_pr_line).collect();
    let picked = prompt.multi_select("Select pull requests to merge:", &options)?;
    if picked.is_empty() {
        print_info("No pull requests selected.");
        return Ok(());
    }

    let confirmed = prompt.confirm(
        &format!("Merge {} pull request(s)?", picked.len()),
        false,
    )?;
    if !confirmed {
        return Ok(());
    }

    for &i in &picked {
        merge_one(api, repo, &prs[i]);
    }

    Ok(())
}

fn merge_one(api: &dyn BitbucketApi, repo: &str, pr: &PullRequest) {
    let spinner = Spinner::new(&format!("Merging pull request #{}...", pr.id));
    match api.merge_pull_request(repo, pr.id, None) {
        Ok(_) => spinner.succeed(&format!("Pull request #{} merged", pr.id)),
        Err(e) => {
            spinner.fail(&format!("Failed to merge pull request #{}", pr.id));
            print_error(&e.to_string());
        }
    }
}
