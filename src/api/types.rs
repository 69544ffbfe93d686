//! Wire types for the Bitbucket Cloud v2 endpoints this tool consumes.

use serde::{Deserialize, Serialize};

/// One page of a branch listing. `next` is the absolute URL of the
/// following page, absent on the last one.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchPage {
    pub values: Vec<BranchRef>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPage {
    pub values: Vec<PullRequest>,
}

/// The slice of a pull request this tool reads. The remote owns the full
/// object; nothing is cached past the current menu screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub source: PrEndpoint,
    pub destination: PrEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrEndpoint {
    pub branch: BranchRef,
}

impl PrEndpoint {
    pub fn named(branch: &str) -> Self {
        Self {
            branch: BranchRef {
                name: branch.to_string(),
            },
        }
    }
}

/// Body of `POST /pullrequests`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    pub description: String,
    pub source: PrEndpoint,
    pub destination: PrEndpoint,
    pub close_source_branch: bool,
}

impl CreatePullRequest {
    /// Fixed title/description template; `close_source_branch` is always
    /// false and not configurable.
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            title: format!("Merge {} into {} (created by bbpr)", source, destination),
            description: "Created with bbpr.".to_string(),
            source: PrEndpoint::named(source),
            destination: PrEndpoint::named(destination),
            close_source_branch: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPullRequest {
    pub links: PrLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrLinks {
    pub html: Link,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Error envelope Bitbucket wraps non-2xx responses in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
