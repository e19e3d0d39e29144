//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod feedback_reader;
mod host_token_resolver;
mod pull_request_resolver;
mod reporter;
mod vcs_factory;

pub use config_repository::JsonConfigRepository;
pub use feedback_reader::{JsonFeedbackReader, parse_feedbacks};
pub use host_token_resolver::HostTokenResolverAdapter;
pub use pull_request_resolver::GitHubActionsResolver;
pub use reporter::ConsoleReporter;
pub use vcs_factory::VcsFactoryAdapter;
