//! Blocking HTTP implementation of the GithubApi port
//!
//! Thin mapping from port calls to REST endpoints under
//! `/repos/{owner}/{name}`. Non-2xx responses become `GithubError::Api`
//! carrying GitHub's `message` field.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::GithubConfig;
use crate::domain::ports::{FileUpload, GithubApi, GithubError, GithubResult, RepoEntry, TreeEntry};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Deserialize)]
struct RefResponse {
    object: ShaOnly,
}

#[derive(Deserialize)]
struct CommitResponse {
    tree: ShaOnly,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: String,
}

pub struct HttpGithubClient {
    client: Client,
    base_url: String,
}

impl HttpGithubClient {
    pub fn new() -> GithubResult<Self> {
        Self::with_base_url(GITHUB_API_BASE)
    }

    /// Client against another API root (GitHub Enterprise, local mocks)
    pub fn with_base_url(base_url: impl Into<String>) -> GithubResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GithubError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, config: &GithubConfig, endpoint: &str) -> String {
        repo_url(&self.base_url, &config.repo, endpoint)
    }

    fn authed(&self, builder: RequestBuilder, config: &GithubConfig) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("token {}", config.token))
            .header(ACCEPT, ACCEPT_V3)
    }

    fn send(&self, builder: RequestBuilder) -> GithubResult<Response> {
        let response = builder
            .send()
            .map_err(|e| GithubError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiMessage>()
            .map(|m| m.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(GithubError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn get<T: DeserializeOwned>(&self, config: &GithubConfig, endpoint: &str) -> GithubResult<T> {
        let url = self.url(config, endpoint);
        debug!(method = "GET", url = %url, "GitHub request");
        let response = self.send(self.authed(self.client.get(&url), config))?;
        decode(response)
    }

    fn post<T: DeserializeOwned>(
        &self,
        config: &GithubConfig,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> GithubResult<T> {
        let url = self.url(config, endpoint);
        debug!(method = "POST", url = %url, "GitHub request");
        let response = self.send(self.authed(self.client.post(&url), config).json(body))?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> GithubResult<T> {
    response
        .json::<T>()
        .map_err(|e| GithubError::Decode(e.to_string()))
}

impl GithubApi for HttpGithubClient {
    fn check_repository(&self, config: &GithubConfig) -> GithubResult<()> {
        let url = self.url(config, "");
        self.send(self.authed(self.client.get(&url), config))?;
        Ok(())
    }

    fn list_contents(&self, config: &GithubConfig, path: &str) -> GithubResult<Vec<RepoEntry>> {
        let endpoint = format!(
            "contents/{}?ref={}",
            encode_path(path),
            encode_path(config.branch())
        );
        self.get(config, &endpoint)
    }

    fn branch_head(&self, config: &GithubConfig, branch: &str) -> GithubResult<String> {
        let reference: RefResponse =
            self.get(config, &format!("git/refs/heads/{}", encode_path(branch)))?;
        Ok(reference.object.sha)
    }

    fn commit_tree(&self, config: &GithubConfig, commit_sha: &str) -> GithubResult<String> {
        let commit: CommitResponse = self.get(config, &format!("git/commits/{}", commit_sha))?;
        Ok(commit.tree.sha)
    }

    fn create_blob(&self, config: &GithubConfig, content: &str) -> GithubResult<String> {
        let blob: ShaOnly = self.post(
            config,
            "git/blobs",
            &json!({ "content": content, "encoding": "utf-8" }),
        )?;
        Ok(blob.sha)
    }

    fn create_tree(
        &self,
        config: &GithubConfig,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> GithubResult<String> {
        let tree: ShaOnly = self.post(
            config,
            "git/trees",
            &json!({ "base_tree": base_tree, "tree": entries }),
        )?;
        Ok(tree.sha)
    }

    fn create_commit(
        &self,
        config: &GithubConfig,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> GithubResult<String> {
        let commit: ShaOnly = self.post(
            config,
            "git/commits",
            &json!({ "message": message, "tree": tree, "parents": parents }),
        )?;
        Ok(commit.sha)
    }

    fn update_branch(&self, config: &GithubConfig, branch: &str, sha: &str) -> GithubResult<()> {
        let url = self.url(config, &format!("git/refs/heads/{}", encode_path(branch)));
        debug!(method = "PATCH", url = %url, "GitHub request");
        self.send(
            self.authed(self.client.patch(&url), config)
                .json(&json!({ "sha": sha, "force": false })),
        )?;
        Ok(())
    }

    fn file_sha(
        &self,
        config: &GithubConfig,
        path: &str,
        branch: &str,
    ) -> GithubResult<Option<String>> {
        let endpoint = format!("contents/{}?ref={}", encode_path(path), encode_path(branch));
        match self.get::<ShaOnly>(config, &endpoint) {
            Ok(file) => Ok(Some(file.sha)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put_file(&self, config: &GithubConfig, upload: &FileUpload) -> GithubResult<()> {
        let url = self.url(config, &format!("contents/{}", encode_path(&upload.path)));
        let mut body = json!({
            "message": upload.message,
            "content": upload.content_base64,
            "branch": upload.branch,
        });
        if let Some(sha) = &upload.sha {
            body["sha"] = json!(sha);
        }
        debug!(method = "PUT", url = %url, "GitHub request");
        let response = self.send(self.authed(self.client.put(&url), config).json(&body))?;
        if response.status() == StatusCode::CREATED {
            debug!(path = %upload.path, "created file");
        }
        Ok(())
    }
}

/// `{base}/repos/{repo}` plus an optional endpoint
pub(crate) fn repo_url(base: &str, repo: &str, endpoint: &str) -> String {
    if endpoint.is_empty() {
        format!("{}/repos/{}", base, repo)
    } else {
        format!("{}/repos/{}/{}", base, repo, endpoint)
    }
}

/// Percent-encode each segment of a repository path, keeping `/`
pub(crate) fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
