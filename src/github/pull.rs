use crate::config::{self, Config};
use crate::error::FetchError;
use crate::window::{self, DateRange};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pull request state filter sent to GitHub.
pub const STATE: &str = "all";
/// Page size requested from GitHub (its maximum).
pub const PER_PAGE: u32 = 100;
/// Only the first page is ever requested; older pull requests beyond
/// `PER_PAGE` are not fetched.
pub const PAGE: u32 = 1;

const USER_AGENT: &str = "prwindow";
const ACCEPT: &str = "application/vnd.github+json";

/// Pull request as returned by `GET /repos/{owner}/{repo}/pulls`.
///
/// Only the fields needed for filtering and projection are kept; the rest of
/// the payload is ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawPullRequest {
    pub id: u64,
    pub user: RawUser,
    pub title: String,
    pub state: String,
    pub created_at: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawUser {
    pub login: String,
}

/// Reduced pull request printed to stdout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PullRequestRecord {
    pub id: u64,
    pub user: String,
    pub title: String,
    pub state: String,
    pub created_at: String,
}

impl From<RawPullRequest> for PullRequestRecord {
    fn from(pull: RawPullRequest) -> Self {
        PullRequestRecord {
            id: pull.id,
            user: pull.user.login,
            title: pull.title,
            state: pull.state,
            created_at: pull.created_at,
        }
    }
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Parses a pull request list response body.
pub fn parse_pull_requests(body: &str) -> Result<Vec<RawPullRequest>, FetchError> {
    serde_json::from_str(body)
        .map_err(|e| FetchError::Parse(format!("Failed to parse pull request list: {e}")))
}

/// Keeps the pull requests created inside `range`, preserving their order.
///
/// Any unparsable `created_at` fails the whole call so that no partial result
/// is returned.
pub fn filter_pull_requests(
    pulls: Vec<RawPullRequest>,
    range: &DateRange,
) -> Result<Vec<PullRequestRecord>, FetchError> {
    pulls
        .into_iter()
        .filter_map(|pull| match window::parse_timestamp(&pull.created_at) {
            Ok(created_at) if range.contains(created_at) => Some(Ok(pull.into())),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
        .collect()
}

fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|err| err.message)
        .ok()
        .or_else(|| Some(body.trim().to_string()).filter(|body| !body.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("no details").to_string())
}

/// Fetches one page of a repository's pull requests and filters it by date.
#[derive(Debug)]
pub struct PullRequestFetcher {
    client: reqwest::Client,
    config: Config,
}

impl PullRequestFetcher {
    pub fn new(client: reqwest::Client, config: Config) -> Self {
        PullRequestFetcher { client, config }
    }

    /// Loads the credential from `path` and builds a client for it.
    pub fn from_config_file(path: &Path) -> Result<Self, FetchError> {
        let config = config::load_config(path)?;
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(PullRequestFetcher::new(client, config))
    }

    /// `{api_url}/repos/{owner}/{repo}/pulls`, with each name as one path segment.
    pub fn pulls_url(&self, owner: &str, repo: &str) -> Result<reqwest::Url, FetchError> {
        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                FetchError::Parse(format!(
                    "API URL `{}` cannot take a path",
                    self.config.api_url
                ))
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "pulls"]);
        Ok(url)
    }

    pub fn build_request(&self, owner: &str, repo: &str) -> Result<reqwest::Request, FetchError> {
        let request = self
            .client
            .get(self.pulls_url(owner, repo)?)
            .query(&[("state", STATE)])
            .query(&[("per_page", PER_PAGE), ("page", PAGE)])
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .build()?;
        Ok(request)
    }

    /// Sends the list request and returns the raw body of a successful response.
    pub async fn fetch_page(&self, owner: &str, repo: &str) -> Result<String, FetchError> {
        let request = self.build_request(owner, repo)?;
        tracing::debug!(url = %request.url(), "requesting pull requests");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                message: api_error_message(status, &body),
            });
        }

        Ok(body)
    }

    /// Returns the pull requests of `owner/repo` created between `start_date`
    /// and `end_date` inclusive, both given as `YYYY-MM-DD`.
    pub async fn fetch_filtered(
        &self,
        owner: &str,
        repo: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<PullRequestRecord>, FetchError> {
        let range = DateRange::parse(start_date, end_date)?;
        let body = self.fetch_page(owner, repo).await?;
        let pulls = parse_pull_requests(&body)?;

        let fetched = pulls.len();
        if fetched >= PER_PAGE as usize {
            tracing::warn!(
                fetched,
                "received a full page of pull requests; older ones beyond page {PAGE} were not fetched"
            );
        }

        let records = filter_pull_requests(pulls, &range)?;
        tracing::info!(
            owner,
            repo,
            fetched,
            matched = records.len(),
            "filtered pull requests"
        );
        Ok(records)
    }
}

/// Loads the credential from `config_path`, then fetches and filters the
/// pull requests of `owner/repo`.
pub async fn fetch_filtered(
    config_path: &Path,
    owner: &str,
    repo: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<PullRequestRecord>, FetchError> {
    PullRequestFetcher::from_config_file(config_path)?
        .fetch_filtered(owner, repo, start_date, end_date)
        .await
}
