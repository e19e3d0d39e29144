//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, HostConfig};
use crate::domain::review::{Feedback, ReviewComment};
use crate::domain::target::{CiContext, PullRequestTarget, TargetOverrides};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// VCS 호스트 토큰 해석 결과.
#[derive(Debug, Clone)]
pub struct HostTokenResolution {
    pub token: Option<String>,
    pub source: Option<String>,
}

/// 호스트 설정(token/env)으로 런타임 토큰을 해석하는 포트.
pub trait HostTokenResolver: Send + Sync {
    fn resolve(&self, host: &str, host_cfg: Option<&HostConfig>) -> HostTokenResolution;
}

/// CI 환경에서 PR 대상을 찾아내는 포트.
pub trait PullRequestResolver: Send + Sync {
    fn resolve(&self, overrides: &TargetOverrides) -> Result<CiContext>;
}

/// AI 피드백 JSON을 읽어오는 포트.
pub trait FeedbackReader: Send + Sync {
    fn read(&self, path: Option<&str>) -> Result<Vec<Feedback>>;
}

/// PR 리뷰 코멘트 API 추상화 포트.
#[async_trait]
pub trait VcsGateway: Send + Sync {
    async fn fetch_head_sha(&self) -> Result<String>;
    async fn list_review_comments(&self) -> Result<Vec<ReviewComment>>;
    async fn create_review_comment(
        &self,
        body: &str,
        commit_id: &str,
        path: &str,
    ) -> Result<ReviewComment>;
    async fn update_review_comment(&self, comment_id: &str, body: &str) -> Result<ReviewComment>;
}

/// 대상/호스트 설정에 맞는 VCS 게이트웨이를 생성하는 팩토리 포트.
pub trait VcsFactory: Send + Sync {
    fn build(
        &self,
        target: &PullRequestTarget,
        api_base: Option<String>,
        token: Option<String>,
    ) -> Box<dyn VcsGateway>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
    fn raw(&self, line: &str);
}
