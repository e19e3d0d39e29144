//! 코멘트를 게시할 PR 대상과 CI 실행 컨텍스트.

use anyhow::{Result, bail};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestTarget {
    /// `https://<host>/<owner>/<repo>/pull/<number>` 형식의 URL을 해석한다.
    pub fn parse_url(input: &str) -> Result<Self> {
        let url = Url::parse(input)?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
            .to_string();

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(ToString::to_string).collect())
            .unwrap_or_default();

        // /owner/repo/pull/<number>
        if segments.len() < 4 || segments[2] != "pull" {
            bail!("unsupported pull request URL: {input}");
        }
        let Ok(number) = segments[3].parse() else {
            bail!("invalid pull request number in URL: {input}");
        };

        Ok(Self {
            host,
            owner: segments[0].clone(),
            repo: segments[1].clone(),
            number,
        })
    }

    /// `owner/repo` 문자열과 PR 번호로 대상을 구성한다.
    pub fn from_repository(host: &str, repository: &str, number: u64) -> Result<Self> {
        let Some((owner, repo)) = repository.trim().split_once('/') else {
            bail!("invalid repository format (expected owner/repo): {repository}");
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            bail!("invalid repository format (expected owner/repo): {repository}");
        }

        Ok(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "https://{}/{}/{}/pull/{}",
            self.host, self.owner, self.repo, self.number
        )
    }
}

/// CI 환경값 대신 사용할 수동 지정 대상.
#[derive(Debug, Clone, Default)]
pub struct TargetOverrides {
    pub pr_url: Option<String>,
    pub repository: Option<String>,
    pub pr_number: Option<u64>,
}

/// CI 잡에서 해석한 실행 컨텍스트.
#[derive(Debug, Clone, Default)]
pub struct CiContext {
    /// PR 이벤트가 아니면 `None`
    pub pull_request: Option<PullRequestTarget>,
    /// 토큰을 찾을 VCS 호스트(PR 이벤트가 아니어도 채워진다)
    pub host: Option<String>,
    /// 체크아웃 루트(상대 경로 계산용)
    pub workspace: Option<String>,
    /// CI가 알려준 API 베이스 URL
    pub api_base: Option<String>,
}

impl CiContext {
    /// PR 대상 호스트, 없으면 CI 서버 호스트, 둘 다 없으면 `github.com`.
    pub fn host(&self) -> &str {
        self.pull_request
            .as_ref()
            .map(|t| t.host.as_str())
            .or(self.host.as_deref())
            .unwrap_or("github.com")
    }
}
