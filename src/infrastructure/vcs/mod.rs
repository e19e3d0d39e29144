//! VCS 연동 계층.
//! PR 리뷰 코멘트 API 구현체를 애플리케이션 포트로 노출한다.

pub mod github;

use crate::application::ports::VcsGateway;
use crate::domain::target::PullRequestTarget;

pub fn build_vcs_client(
    target: &PullRequestTarget,
    api_base: Option<String>,
    token: Option<String>,
) -> Box<dyn VcsGateway> {
    Box::new(github::GitHubClient::new(
        target.host.clone(),
        target.owner.clone(),
        target.repo.clone(),
        target.number,
        token,
        api_base,
    ))
}
