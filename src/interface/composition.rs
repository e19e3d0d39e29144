//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::comment_per_file::CommentPerFileUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, GitHubActionsResolver, HostTokenResolverAdapter, JsonConfigRepository,
    JsonFeedbackReader, VcsFactoryAdapter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    host_token_resolver: HostTokenResolverAdapter,
    pull_request_resolver: GitHubActionsResolver,
    feedback_reader: JsonFeedbackReader,
    vcs_factory: VcsFactoryAdapter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            host_token_resolver: HostTokenResolverAdapter,
            pull_request_resolver: GitHubActionsResolver,
            feedback_reader: JsonFeedbackReader,
            vcs_factory: VcsFactoryAdapter,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// 파일 단위 코멘트 게시 유스케이스를 생성한다.
    pub fn comment_per_file_usecase(&self) -> CommentPerFileUseCase<'_> {
        CommentPerFileUseCase {
            config_repo: &self.config_repo,
            host_token_resolver: &self.host_token_resolver,
            pull_request_resolver: &self.pull_request_resolver,
            feedback_reader: &self.feedback_reader,
            vcs_factory: &self.vcs_factory,
            reporter: &self.reporter,
        }
    }
}
