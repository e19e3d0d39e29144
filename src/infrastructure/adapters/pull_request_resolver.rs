//! CI 컨텍스트 해석 포트 구현 어댑터.

use anyhow::Result;

use crate::application::ports::PullRequestResolver;
use crate::domain::target::{CiContext, TargetOverrides};
use crate::infrastructure::ci::GitHubActionsEnv;

/// 실행 시점의 GitHub Actions 환경변수로 PR 대상을 해석한다.
pub struct GitHubActionsResolver;

impl PullRequestResolver for GitHubActionsResolver {
    fn resolve(&self, overrides: &TargetOverrides) -> Result<CiContext> {
        GitHubActionsEnv::from_env().resolve(overrides)
    }
}
