//! 파일 단위 리뷰 코멘트 도메인 엔티티/값 객체.

use crate::domain::target::TargetOverrides;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 피드백 JSON 경로(`None`/`-`이면 stdin)
    pub feedback_path: Option<String>,
    /// CLI로 지정한 sign-off(미지정 시 설정값 사용)
    pub sign_off: Option<String>,
    pub target: TargetOverrides,
    pub dry_run: bool,
    pub strict: bool,
}

/// AI 모델이 생성한 파일 단위 피드백.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub file_name: String,
    pub details: String,
    /// 모델이 매긴 위험도(정수/실수 모두 허용)
    pub risk_score: Option<f64>,
}

/// PR에 이미 달려 있는 리뷰 코멘트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    pub id: String,
    /// 파일 경로(삭제/outdated 코멘트는 없을 수 있다)
    pub path: Option<String>,
    pub body: String,
}

/// 피드백 한 건에 대해 수행한 동작.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Created,
    Updated,
}

impl FeedbackAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "create",
            Self::Updated => "update",
        }
    }
}

/// 게시 자체를 건너뛴 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotPullRequest,
    PullRequestUnavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    /// 파일명이 비어 있어 무시한 피드백 수
    pub ignored: usize,
    pub skipped: Option<SkipReason>,
    pub dry_run: bool,
}

impl PublishSummary {
    pub fn record(&mut self, action: FeedbackAction) {
        match action {
            FeedbackAction::Created => self.created += 1,
            FeedbackAction::Updated => self.updated += 1,
        }
    }

    /// 실패/중단 없이 끝났는지 여부(`NotPullRequest`는 정상 종료로 본다).
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped != Some(SkipReason::PullRequestUnavailable)
    }
}
