//! GitHub Pull Request 리뷰 코멘트 API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::application::ports::VcsGateway;
use crate::domain::review::ReviewComment;

/// 목록 조회 페이지 크기(GitHub 최대값).
const PAGE_SIZE: usize = 100;

pub struct GitHubClient {
    client: Client,
    host: String,
    owner: String,
    repo: String,
    number: u64,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    /// GitHub 대상 클라이언트를 생성한다.
    pub fn new(
        host: String,
        owner: String,
        repo: String,
        number: u64,
        token: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            host,
            owner,
            repo,
            number,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.host)
        }
    }

    fn pull_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base(),
            self.owner,
            self.repo,
            self.number
        )
    }

    fn review_comments_endpoint(&self) -> String {
        format!("{}/comments", self.pull_endpoint())
    }

    fn review_comment_endpoint(&self, comment_id: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/comments/{}",
            self.api_base(),
            self.owner,
            self.repo,
            comment_id
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prfeedback")
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    head: PullHead,
}

#[derive(Debug, Deserialize)]
struct PullHead {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ReviewCommentResponse {
    id: u64,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

impl From<ReviewCommentResponse> for ReviewComment {
    fn from(c: ReviewCommentResponse) -> Self {
        Self {
            id: c.id.to_string(),
            path: c.path,
            body: c.body.unwrap_or_default(),
        }
    }
}

/// 상태 코드를 확인하고 JSON 본문을 역직렬화한다.
async fn read_json<T: DeserializeOwned>(resp: Response, action: &str) -> Result<T> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .with_context(|| format!("github: failed to read {action} body"))?;

    if !status.is_success() {
        anyhow::bail!("github: failed to {action} ({status}): {body}");
    }

    serde_json::from_str(&body).with_context(|| format!("github: invalid {action} JSON"))
}

#[async_trait]
impl VcsGateway for GitHubClient {
    async fn fetch_head_sha(&self) -> Result<String> {
        let resp = self
            .request(Method::GET, self.pull_endpoint())
            .send()
            .await
            .context("github: failed to fetch PR")?;

        let pr: PullResponse = read_json(resp, "fetch PR metadata").await?;
        Ok(pr.head.sha)
    }

    async fn list_review_comments(&self) -> Result<Vec<ReviewComment>> {
        let mut comments = Vec::new();
        let mut page = 1usize;

        loop {
            let resp = self
                .request(Method::GET, self.review_comments_endpoint())
                .query(&[("per_page", PAGE_SIZE), ("page", page)])
                .send()
                .await
                .context("github: failed to list review comments")?;

            let batch: Vec<ReviewCommentResponse> =
                read_json(resp, "list review comments").await?;
            let last_page = batch.len() < PAGE_SIZE;
            comments.extend(batch.into_iter().map(ReviewComment::from));

            if last_page {
                break;
            }
            page += 1;
        }

        Ok(comments)
    }

    async fn create_review_comment(
        &self,
        body: &str,
        commit_id: &str,
        path: &str,
    ) -> Result<ReviewComment> {
        let resp = self
            .request(Method::POST, self.review_comments_endpoint())
            .json(&json!({
                "body": body,
                "commit_id": commit_id,
                "path": path,
                "subject_type": "file",
            }))
            .send()
            .await
            .context("github: failed to create review comment")?;

        let comment: ReviewCommentResponse = read_json(resp, "create review comment").await?;
        Ok(comment.into())
    }

    async fn update_review_comment(&self, comment_id: &str, body: &str) -> Result<ReviewComment> {
        let resp = self
            .request(Method::PATCH, self.review_comment_endpoint(comment_id))
            .json(&json!({ "body": body }))
            .send()
            .await
            .context("github: failed to update review comment")?;

        let comment: ReviewCommentResponse = read_json(resp, "update review comment").await?;
        Ok(comment.into())
    }
}
