//! 피드백별 코멘트 렌더링 및 생성/갱신 단계.

use anyhow::Result;

use crate::application::usecases::comment_per_file::{
    CommentPerFileUseCase, context::ExecutionContext,
};
use crate::domain::policy::{
    build_comment_body, find_bot_comment, relative_path, upsert_comment_cache,
};
use crate::domain::review::{Feedback, FeedbackAction, PublishSummary, ReviewComment, RunOptions};

/// 피드백을 입력 순서대로 게시한다. 한 건의 실패는 기록만 하고 다음 건으로 넘어간다.
pub(super) async fn publish_feedbacks(
    use_case: &CommentPerFileUseCase<'_>,
    options: &RunOptions,
    ctx: &mut ExecutionContext,
    feedbacks: &[Feedback],
    sign_off: &str,
    summary: &mut PublishSummary,
) {
    use_case.reporter.section(if options.dry_run {
        "Dry Run: File Comments"
    } else {
        "Post File Comments"
    });

    for feedback in feedbacks {
        if feedback.file_name.trim().is_empty() {
            tracing::warn!(
                "Skipping feedback without a file name: {}",
                feedback.details
            );
            summary.ignored += 1;
            continue;
        }

        match publish_feedback(use_case, options, ctx, feedback, sign_off).await {
            Ok(action) => summary.record(action),
            Err(err) => {
                tracing::error!(
                    "Failed to comment on PR for feedback: {}. Error: {err:#}",
                    feedback.details
                );
                summary.failed += 1;
            }
        }
    }
}

async fn publish_feedback(
    use_case: &CommentPerFileUseCase<'_>,
    options: &RunOptions,
    ctx: &mut ExecutionContext,
    feedback: &Feedback,
    sign_off: &str,
) -> Result<FeedbackAction> {
    let body = build_comment_body(&feedback.details, sign_off);
    let path = relative_path(
        &feedback.file_name,
        &ctx.target.repo,
        ctx.workspace.as_deref(),
    );
    let existing =
        find_bot_comment(&ctx.existing_comments, &path, sign_off).map(|c| c.id.clone());
    let action = if existing.is_some() {
        FeedbackAction::Updated
    } else {
        FeedbackAction::Created
    };

    if options.dry_run {
        let risk = feedback
            .risk_score
            .map(|score| format!(", risk {score}"))
            .unwrap_or_default();
        use_case
            .reporter
            .raw(&format!("--- {} (would {}{}) ---", path, action.label(), risk));
        use_case.reporter.raw(&body);
        return Ok(action);
    }

    let posted = if let Some(comment_id) = existing {
        use_case.reporter.status(&path, "updating comment");
        ctx.vcs.update_review_comment(&comment_id, &body).await?
    } else {
        use_case.reporter.status(&path, "creating comment");
        ctx.vcs
            .create_review_comment(&body, &ctx.head_sha, &path)
            .await?
    };

    let posted = ReviewComment {
        path: posted.path.or(Some(path)),
        ..posted
    };
    upsert_comment_cache(&mut ctx.existing_comments, posted);
    Ok(action)
}
