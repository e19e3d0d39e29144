//! CI 환경(GitHub Actions)에서 PR 컨텍스트를 읽어오는 모듈.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use url::Url;

use crate::domain::target::{CiContext, PullRequestTarget, TargetOverrides};

const DEFAULT_HOST: &str = "github.com";

/// GitHub Actions가 잡에 주입하는 환경값 묶음.
#[derive(Debug, Clone, Default)]
pub struct GitHubActionsEnv {
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub server_url: Option<String>,
    pub workspace: Option<String>,
}

impl GitHubActionsEnv {
    pub fn from_env() -> Self {
        Self {
            repository: non_empty_env("GITHUB_REPOSITORY"),
            event_path: non_empty_env("GITHUB_EVENT_PATH").map(PathBuf::from),
            api_url: non_empty_env("GITHUB_API_URL"),
            server_url: non_empty_env("GITHUB_SERVER_URL"),
            workspace: non_empty_env("GITHUB_WORKSPACE"),
        }
    }

    /// 수동 지정값(`--pr-url`, `--repository`/`--pr-number`)을 우선 적용하고,
    /// 없으면 이벤트 payload에서 PR 번호를 찾는다.
    pub fn resolve(&self, overrides: &TargetOverrides) -> Result<CiContext> {
        if let Some(pr_url) = &overrides.pr_url {
            let target = PullRequestTarget::parse_url(pr_url)
                .with_context(|| format!("failed to parse pull request URL: {pr_url}"))?;
            // 다른 호스트를 가리키면 CI의 API URL을 재사용하지 않는다.
            let api_base = if target.host == self.host()? {
                self.api_url.clone()
            } else {
                None
            };
            return Ok(CiContext {
                host: Some(target.host.clone()),
                pull_request: Some(target),
                workspace: self.workspace.clone(),
                api_base,
            });
        }

        let host = self.host()?;
        let repository = overrides
            .repository
            .as_deref()
            .or(self.repository.as_deref())
            .context("GITHUB_REPOSITORY is not set; pass --repository or --pr-url")?;

        let number = match overrides.pr_number {
            Some(number) => Some(number),
            None => self.pull_request_number_from_event()?,
        };

        let pull_request = match number {
            Some(number) => Some(PullRequestTarget::from_repository(
                &host,
                repository,
                number,
            )?),
            None => None,
        };

        Ok(CiContext {
            pull_request,
            host: Some(host),
            workspace: self.workspace.clone(),
            api_base: self.api_url.clone(),
        })
    }

    fn host(&self) -> Result<String> {
        let Some(server_url) = &self.server_url else {
            return Ok(DEFAULT_HOST.to_string());
        };
        let url = Url::parse(server_url)
            .with_context(|| format!("invalid GITHUB_SERVER_URL: {server_url}"))?;
        url.host_str()
            .map(ToString::to_string)
            .with_context(|| format!("GITHUB_SERVER_URL has no host: {server_url}"))
    }

    fn pull_request_number_from_event(&self) -> Result<Option<u64>> {
        let path = self
            .event_path
            .as_ref()
            .context("GITHUB_EVENT_PATH is not set; pass --pr-number or --pr-url")?;
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read event payload at {}", path.display()))?;
        let payload: Value = serde_json::from_str(&raw)
            .with_context(|| format!("invalid event payload JSON in {}", path.display()))?;
        pull_request_number(&payload)
    }
}

/// payload에 `pull_request`가 없으면 PR 이벤트가 아니다.
fn pull_request_number(payload: &Value) -> Result<Option<u64>> {
    let Some(pull_request) = payload.get("pull_request").filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    let number = pull_request
        .get("number")
        .and_then(Value::as_u64)
        .or_else(|| payload.get("number").and_then(Value::as_u64));

    match number {
        Some(number) => Ok(Some(number)),
        None => bail!("pull request event payload has no number"),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
