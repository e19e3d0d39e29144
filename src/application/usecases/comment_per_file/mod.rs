//! AI 피드백을 PR에 파일 단위 리뷰 코멘트로 게시하는 유스케이스.

mod context;
mod publish;

use anyhow::{Context, Result, bail};

use crate::application::config::Config;
use crate::application::ports::{
    ConfigRepository, FeedbackReader, HostTokenResolver, PullRequestResolver, Reporter,
    VcsFactory,
};
use crate::domain::review::{Feedback, PublishSummary, RunOptions, SkipReason};

use context::{ContextDecision, load_execution_context};
use publish::publish_feedbacks;

/// 피드백 로딩부터 PR 코멘트 업서트까지 전체 흐름을 조율한다.
pub struct CommentPerFileUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub host_token_resolver: &'a dyn HostTokenResolver,
    pub pull_request_resolver: &'a dyn PullRequestResolver,
    pub feedback_reader: &'a dyn FeedbackReader,
    pub vcs_factory: &'a dyn VcsFactory,
    pub reporter: &'a dyn Reporter,
}

impl<'a> CommentPerFileUseCase<'a> {
    /// CLI 진입점.
    /// 설정/피드백 입력 오류는 그대로 반환하고, PR API 오류는 로그만 남긴다.
    /// strict 모드에서는 실패가 하나라도 있으면 에러로 끝난다.
    pub async fn execute(&self, options: RunOptions) -> Result<PublishSummary> {
        let config = self
            .config_repo
            .load()
            .context("failed to load prfeedback config")?;
        let sign_off = options.sign_off.clone().unwrap_or_else(|| config.sign_off());
        let strict = options.strict || config.strict();

        self.reporter.section("Session");
        self.reporter.kv(
            "Mode",
            if options.dry_run {
                "dry-run"
            } else {
                "post-comment"
            },
        );
        self.reporter.kv("Sign-off", &sign_off);
        if strict {
            self.reporter.kv("Strict", "enabled");
        }

        let feedbacks = self
            .feedback_reader
            .read(options.feedback_path.as_deref())
            .context("failed to read feedbacks")?;
        self.reporter.kv("Feedbacks", &feedbacks.len().to_string());

        let summary = self
            .comment_per_file(&config, &options, &feedbacks, &sign_off)
            .await;
        self.report_summary(&summary);

        if strict && !summary.is_clean() {
            bail!(
                "{} feedback(s) failed to publish{}",
                summary.failed,
                if summary.skipped == Some(SkipReason::PullRequestUnavailable) {
                    " (pull request unavailable)"
                } else {
                    ""
                }
            );
        }

        Ok(summary)
    }

    /// 피드백마다 파일 단위 코멘트를 생성하거나, 같은 sign-off의 기존 코멘트를 갱신한다.
    /// 이 단계의 오류는 호출자에게 전파하지 않는다.
    pub async fn comment_per_file(
        &self,
        config: &Config,
        options: &RunOptions,
        feedbacks: &[Feedback],
        sign_off: &str,
    ) -> PublishSummary {
        let mut summary = PublishSummary {
            dry_run: options.dry_run,
            ..Default::default()
        };

        let mut ctx = match load_execution_context(self, config, options).await {
            Ok(ContextDecision::Ready(ctx)) => ctx,
            Ok(ContextDecision::Skip(reason)) => {
                summary.skipped = Some(reason);
                return summary;
            }
            Err(err) => {
                tracing::error!("Failed to get pull request: {err:#}");
                summary.skipped = Some(SkipReason::PullRequestUnavailable);
                return summary;
            }
        };

        publish_feedbacks(self, options, &mut ctx, feedbacks, sign_off, &mut summary).await;
        summary
    }

    fn report_summary(&self, summary: &PublishSummary) {
        self.reporter.section("Done");
        match summary.skipped {
            Some(SkipReason::NotPullRequest) => {
                self.reporter.status("Publish", "skipped (not a pull request)");
            }
            Some(SkipReason::PullRequestUnavailable) => {
                self.reporter.status("Publish", "aborted (pull request unavailable)");
            }
            None => {}
        }
        let (created, updated) = if summary.dry_run {
            ("Would create", "Would update")
        } else {
            ("Created", "Updated")
        };
        self.reporter.kv(created, &summary.created.to_string());
        self.reporter.kv(updated, &summary.updated.to_string());
        self.reporter.kv("Failed", &summary.failed.to_string());
        if summary.ignored > 0 {
            self.reporter.kv("Ignored", &summary.ignored.to_string());
        }
    }
}
