//! 게시 컨텍스트(대상 PR/토큰/HEAD SHA/기존 코멘트) 준비 단계.

use anyhow::{Context, Result, bail};

use crate::application::config::Config;
use crate::application::ports::VcsGateway;
use crate::application::usecases::comment_per_file::CommentPerFileUseCase;
use crate::domain::review::{ReviewComment, RunOptions, SkipReason};
use crate::domain::target::PullRequestTarget;

/// 게시 단계 전 구간에서 공유되는 실행 상태.
pub(super) struct ExecutionContext {
    pub target: PullRequestTarget,
    pub workspace: Option<String>,
    pub vcs: Box<dyn VcsGateway>,
    pub head_sha: String,
    pub existing_comments: Vec<ReviewComment>,
}

pub(super) enum ContextDecision {
    Skip(SkipReason),
    Ready(ExecutionContext),
}

/// CI 컨텍스트 해석, 토큰 확인, HEAD SHA/기존 코멘트 조회까지 선행한다.
pub(super) async fn load_execution_context(
    use_case: &CommentPerFileUseCase<'_>,
    config: &Config,
    options: &RunOptions,
) -> Result<ContextDecision> {
    let ci = use_case
        .pull_request_resolver
        .resolve(&options.target)
        .context("failed to resolve pull request context")?;

    // 토큰 확인을 PR 이벤트 여부 판단보다 먼저 한다.
    let host = ci.host().to_string();
    let host_cfg = config.host_config(&host);
    let token = use_case.host_token_resolver.resolve(&host, host_cfg);
    if !options.dry_run && token.token.is_none() {
        bail!(
            "missing GitHub token for host '{}' ({}). Configure hosts.{}.token or hosts.{}.token_env, or use --dry-run",
            host,
            token.source.as_deref().unwrap_or("no token source"),
            host,
            host,
        );
    }

    let Some(target) = ci.pull_request else {
        tracing::warn!("Not a pull request. Skipping commenting on PR...");
        return Ok(ContextDecision::Skip(SkipReason::NotPullRequest));
    };

    let api_base = host_cfg.and_then(|h| h.api_base.clone()).or(ci.api_base);
    let vcs = use_case.vcs_factory.build(&target, api_base, token.token);

    use_case.reporter.section("Fetch Target");
    use_case.reporter.kv("Pull Request", &target.url());
    if let Some(source) = &token.source {
        use_case.reporter.kv("Token", source);
    }
    use_case.reporter.status("VCS", "fetching head SHA");
    let head_sha = vcs
        .fetch_head_sha()
        .await
        .context("failed to fetch pull request head")?;
    use_case.reporter.kv("Head SHA", &head_sha);

    use_case.reporter.status("VCS", "listing review comments");
    let existing_comments = vcs
        .list_review_comments()
        .await
        .context("failed to list existing review comments")?;
    use_case
        .reporter
        .kv("Comments", &existing_comments.len().to_string());

    Ok(ContextDecision::Ready(ExecutionContext {
        target,
        workspace: ci.workspace,
        vcs,
        head_sha,
        existing_comments,
    }))
}
