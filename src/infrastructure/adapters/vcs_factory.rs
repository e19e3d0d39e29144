//! VCS 게이트웨이 팩토리 포트 구현 어댑터.

use crate::application::ports::{VcsFactory, VcsGateway};
use crate::domain::target::PullRequestTarget;
use crate::infrastructure::vcs;

pub struct VcsFactoryAdapter;

impl VcsFactory for VcsFactoryAdapter {
    fn build(
        &self,
        target: &PullRequestTarget,
        api_base: Option<String>,
        token: Option<String>,
    ) -> Box<dyn VcsGateway> {
        vcs::build_vcs_client(target, api_base, token)
    }
}
