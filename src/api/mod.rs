//! Bitbucket Cloud REST client.
//!
//! [`BitbucketApi`] is the seam between the interactive workflow and the
//! network: one method per consumed endpoint, implemented for real by
//! [`BitbucketClient`] and by a scripted mock in tests.

pub mod types;

#[cfg(test)]
pub mod mock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;

use crate::config::Config;
use crate::error::{BbprError, Result};
use types::{
    ApiErrorBody, BranchPage, CreatePullRequest, CreatedPullRequest, PullRequest,
    PullRequestPage,
};

const BASE_URL: &str = "https://api.bitbucket.org/2.0";
const PAGE_LEN: u32 = 50;

pub trait BitbucketApi {
    /// Fetch one page of the branch listing: the first page when `page` is
    /// `None`, otherwise the absolute `next` URL from a previous page.
    fn branch_page(&self, repo: &str, page: Option<&str>) -> Result<BranchPage>;

    fn list_pull_requests(&self, repo: &str, state: &str) -> Result<Vec<PullRequest>>;

    /// Create one pull request; returns the HTML link of the created PR.
    /// The remote applies no idempotency: identical calls create distinct
    /// pull requests.
    fn create_pull_request(&self, repo: &str, body: &CreatePullRequest) -> Result<String>;

    /// Merge with the fixed merge-commit strategy. A `None` message falls
    /// back to [`default_merge_message`].
    fn merge_pull_request(
        &self,
        repo: &str,
        id: u64,
        message: Option<&str>,
    ) -> Result<PullRequest>;
}

pub fn default_merge_message(id: u64) -> String {
    format!("Merged pull request #{} via bbpr", id)
}

/// Blocking HTTP client preconfigured with the API base URL and a Basic
/// auth header built from the stored credentials.
pub struct BitbucketClient {
    http: Client,
    base_url: String,
    workspace: String,
}

impl BitbucketClient {
    pub fn new(config: &Config) -> Result<Self> {
        let auth = STANDARD.encode(format!("{}:{}", config.username, config.password));

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Basic {}", auth))
            .map_err(|e| BbprError::Config(format!("Invalid credentials: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            workspace: config.workspace.clone(),
        })
    }

    fn repo_url(&self, repo: &str, tail: &str) -> String {
        format!(
            "{}/repositories/{}/{}/{}",
            self.base_url, self.workspace, repo, tail
        )
    }

    /// Decode a 2xx body as JSON; on non-2xx surface the remote `error.message`
    /// when the body carries one, else a plain status-code message.
    fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json()?);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| format!("request failed with status {}", status));
        Err(BbprError::Api(message))
    }
}

impl BitbucketApi for BitbucketClient {
    fn branch_page(&self, repo: &str, page: Option<&str>) -> Result<BranchPage> {
        let url = match page {
            Some(next) => next.to_string(),
            None => self.repo_url(repo, &format!("refs/branches?pagelen={}", PAGE_LEN)),
        };
        Self::decode(self.http.get(url).send()?)
    }

    fn list_pull_requests(&self, repo: &str, state: &str) -> Result<Vec<PullRequest>> {
        let url = self.repo_url(
            repo,
            &format!("pullrequests?pagelen={}&state={}", PAGE_LEN, state),
        );
        let page: PullRequestPage = Self::decode(self.http.get(url).send()?)?;
        Ok(page.values)
    }

    fn create_pull_request(&self, repo: &str, body: &CreatePullRequest) -> Result<String> {
        let url = self.repo_url(repo, "pullrequests");
        let created: CreatedPullRequest =
            Self::decode(self.http.post(url).json(body).send()?)?;
        Ok(created.links.html.href)
    }

    fn merge_pull_request(
        &self,
        repo: &str,
        id: u64,
        message: Option<&str>,
    ) -> Result<PullRequest> {
        let url = self.repo_url(repo, &format!("pullrequests/{}/merge", id));
        let message = match message {
            Some(m) => m.to_string(),
            None => default_merge_message(id),
        };
        let body = json!({
            "merge_strategy": "merge_commit",
            "message": message,
        });
        Self::decode(self.http.post(url).json(&body).send()?)
    }
}
