//! Branch listing with cursor pagination.

use crate::api::BitbucketApi;
use crate::output::print_warning;

/// Fetch all branch names for a repository, following `next` cursors until
/// the listing is exhausted.
///
/// A failed page request aborts the walk: the warning is printed and
/// whatever pages already succeeded are returned (possibly nothing). There
/// is no retry; a fresh call restarts from page one.
pub fn fetch_branches(api: &dyn BitbucketApi, repo: &str) -> Vec<String> {
    let mut branches = Vec::new();
    let mut next: Option<String> = None;

    loop {
        match api.branch_page(repo, next.as_deref()) {
            Ok(page) => {
                branches.extend(page.values.into_iter().map(|branch| branch.name));
                match page.next {
                    Some(url) => next = Some(url),
                    None => break,
                }
            }
            Err(e) => {
                print_warning(&format!("Failed to fetch branches: {}", e));
                break;
            }
        }
    }

    branches
}

/// Branch list fetched at most once per workflow invocation.
///
/// The create flow may need the list for the source prompt, the destination
/// prompt, both, or neither; the cache keeps that to a single fetch.
pub struct BranchCache {
    branches: Option<Vec<String>>,
}

impl BranchCache {
    pub fn new() -> Self {
        Self { branches: None }
    }

    pub fn get(&mut self, api: &dyn BitbucketApi, repo: &str) -> &[String] {
        if self.branches.is_none() {
            self.branches = Some(fetch_branches(api, repo));
        }
        self.branches.as_deref().unwrap_or_default()
    }
}

impl Default for BranchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{page, MockApi};

    #[test]
    fn single_page_listing() {
        let api = MockApi::new().with_branches(&["main", "develop"]);
        assert_eq!(fetch_branches(&api, "svc-api"), vec!["main", "develop"]);
        assert_eq!(api.branch_fetches(), 1);
    }

    #[test]
    fn follows_next_cursors_in_order() {
        let api = MockApi::new().with_branch_pages(vec![
            Ok(page(&["main", "develop"], Some("https://api/x?page=2"))),
            Ok(page(&["staging"], Some("https://api/x?page=3"))),
            Ok(page(&["prod"], None)),
        ]);

        let branches = fetch_branches(&api, "svc-api");
        assert_eq!(branches, vec!["main", "develop", "staging", "prod"]);

        // One logical fetch, with the cursor URLs followed verbatim.
        let calls = api.branch_page_calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                None,
                Some("https://api/x?page=2".to_string()),
                Some("https://api/x?page=3".to_string()),
            ]
        );
    }

    #[test]
    fn mid_pagination_failure_keeps_accumulated_pages() {
        let api = MockApi::new().with_branch_pages(vec![
            Ok(page(&["main", "develop"], Some("https://api/x?page=2"))),
            Err("boom".to_string()),
        ]);

        assert_eq!(fetch_branches(&api, "svc-api"), vec!["main", "develop"]);
    }

    #[test]
    fn first_page_failure_yields_empty() {
        let api = MockApi::new().with_branch_pages(vec![Err("boom".to_string())]);
        assert!(fetch_branches(&api, "svc-api").is_empty());
    }

    #[test]
    fn cache_fetches_once() {
        let api = MockApi::new().with_branches(&["main", "develop"]);
        let mut cache = BranchCache::new();

        assert_eq!(cache.get(&api, "svc-api"), ["main", "develop"]);
        assert_eq!(cache.get(&api, "svc-api"), ["main", "develop"]);
        assert_eq!(api.branch_fetches(), 1);
    }
}
