//! Scripted [`BitbucketApi`] double for workflow tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use super::types::{BranchPage, BranchRef, CreatePullRequest, PullRequest};
use super::{default_merge_message, BitbucketApi};
use crate::error::{BbprError, Result};

type PageScript = std::result::Result<BranchPage, String>;

#[derive(Default)]
pub struct MockApi {
    branch_pages: Mutex<VecDeque<PageScript>>,
    prs: Vec<PullRequest>,
    fail_creates: HashSet<String>,
    fail_merges: HashSet<u64>,

    pub branch_page_calls: Mutex<Vec<Option<String>>>,
    pub created: Mutex<Vec<(String, String, String)>>,
    pub merged: Mutex<Vec<(String, u64, String)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue branch pages to serve in order; `Err` entries simulate a page
    /// request failing.
    pub fn with_branch_pages(self, pages: Vec<PageScript>) -> Self {
        *self.branch_pages.lock().unwrap() = pages.into();
        self
    }

    /// Convenience: a single terminal page holding the given branch names.
    pub fn with_branches(self, names: &[&str]) -> Self {
        self.with_branch_pages(vec![Ok(page(names, None))])
    }

    pub fn with_prs(mut self, prs: Vec<PullRequest>) -> Self {
        self.prs = prs;
        self
    }

    /// Make creates targeting this destination branch fail.
    pub fn failing_create(mut self, destination: &str) -> Self {
        self.fail_creates.insert(destination.to_string());
        self
    }

    pub fn failing_merge(mut self, id: u64) -> Self {
        self.fail_merges.insert(id);
        self
    }

    pub fn branch_fetches(&self) -> usize {
        // A fetch starts at page one; follow-up pages belong to the same fetch.
        self.branch_page_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|page| page.is_none())
            .count()
    }

    pub fn created_pairs(&self) -> Vec<(String, String)> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|(_, src, dst)| (src.clone(), dst.clone()))
            .collect()
    }

    pub fn merged_ids(&self) -> Vec<u64> {
        self.merged.lock().unwrap().iter().map(|(_, id, _)| *id).collect()
    }
}

pub fn page(names: &[&str], next: Option<&str>) -> BranchPage {
    BranchPage {
        values: names
            .iter()
            .map(|name| BranchRef {
                name: name.to_string(),
            })
            .collect(),
        next: next.map(String::from),
    }
}

impl BitbucketApi for MockApi {
    fn branch_page(&self, _repo: &str, page: Option<&str>) -> Result<BranchPage> {
        self.branch_page_calls
            .lock()
            .unwrap()
            .push(page.map(String::from));
        match self.branch_pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(message)) => Err(BbprError::Api(message)),
            None => panic!("no scripted branch page left"),
        }
    }

    fn list_pull_requests(&self, _repo: &str, _state: &str) -> Result<Vec<PullRequest>> {
        Ok(self.prs.clone())
    }

    fn create_pull_request(&self, repo: &str, body: &CreatePullRequest) -> Result<String> {
        let source = body.source.branch.name.clone();
        let destination = body.destination.branch.name.clone();
        self.created
            .lock()
            .unwrap()
            .push((repo.to_string(), source, destination.clone()));

        if self.fail_creates.contains(&destination) {
            return Err(BbprError::Api(format!(
                "cannot create pull request into {}",
                destination
            )));
        }
        Ok(format!("https://bitbucket.org/{}/pull-requests/1", repo))
    }

    fn merge_pull_request(
        &self,
        repo: &str,
        id: u64,
        message: Option<&str>,
    ) -> Result<PullRequest> {
        let message = message
            .map(String::from)
            .unwrap_or_else(|| default_merge_message(id));
        self.merged
            .lock()
            .unwrap()
            .push((repo.to_string(), id, message));

        if self.fail_merges.contains(&id) {
            return Err(BbprError::Api(format!("pull request {} has conflicts", id)));
        }
        Ok(PullRequest {
            id,
            title: format!("PR #{}", id),
            source: super::types::PrEndpoint::named("feature"),
            destination: super::types::PrEndpoint::named("main"),
        })
    }
}
