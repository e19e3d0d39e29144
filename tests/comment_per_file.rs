use std::collections::HashMap;

use anyhow::Result;
use prfeedback::application::config::{Config, DefaultsConfig, HostConfig};
use prfeedback::application::ports::{
    ConfigRepository, FeedbackReader, HostTokenResolution, HostTokenResolver,
    PullRequestResolver, Reporter,
};
use prfeedback::application::usecases::comment_per_file::CommentPerFileUseCase;
use prfeedback::domain::review::{Feedback, RunOptions, SkipReason};
use prfeedback::domain::target::{CiContext, PullRequestTarget, TargetOverrides};
use prfeedback::infrastructure::adapters::VcsFactoryAdapter;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SIGN_OFF: &str = "<sub>review-bot</sub>";
const PULL: &str = "/repos/acme/widgets/pulls/7";
const COMMENTS: &str = "/repos/acme/widgets/pulls/7/comments";

struct StaticConfig(Config);

impl ConfigRepository for StaticConfig {
    fn load(&self) -> Result<Config> {
        Ok(self.0.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok("{}".to_string())
    }
}

struct StaticToken(Option<&'static str>);

impl HostTokenResolver for StaticToken {
    fn resolve(&self, _host: &str, _host_cfg: Option<&HostConfig>) -> HostTokenResolution {
        HostTokenResolution {
            token: self.0.map(ToString::to_string),
            source: Some("test".to_string()),
        }
    }
}

struct StaticPullRequest(CiContext);

impl PullRequestResolver for StaticPullRequest {
    fn resolve(&self, _overrides: &TargetOverrides) -> Result<CiContext> {
        Ok(self.0.clone())
    }
}

struct StaticFeedbacks(Vec<Feedback>);

impl FeedbackReader for StaticFeedbacks {
    fn read(&self, _path: Option<&str>) -> Result<Vec<Feedback>> {
        Ok(self.0.clone())
    }
}

struct SilentReporter;

impl Reporter for SilentReporter {
    fn section(&self, _name: &str) {}
    fn kv(&self, _key: &str, _value: &str) {}
    fn status(&self, _scope: &str, _message: &str) {}
    fn raw(&self, _line: &str) {}
}

struct Harness {
    config: StaticConfig,
    token: StaticToken,
    pull_request: StaticPullRequest,
    feedbacks: StaticFeedbacks,
}

impl Harness {
    fn new(server: &MockServer, feedbacks: Vec<Feedback>) -> Self {
        Self {
            config: StaticConfig(Config {
                defaults: DefaultsConfig {
                    sign_off: Some(SIGN_OFF.to_string()),
                    strict: None,
                },
                hosts: HashMap::new(),
            }),
            token: StaticToken(Some("test-token")),
            pull_request: StaticPullRequest(CiContext {
                pull_request: Some(PullRequestTarget {
                    host: "github.com".to_string(),
                    owner: "acme".to_string(),
                    repo: "widgets".to_string(),
                    number: 7,
                }),
                host: Some("github.com".to_string()),
                workspace: Some("/home/runner/work/widgets/widgets".to_string()),
                api_base: Some(server.uri()),
            }),
            feedbacks: StaticFeedbacks(feedbacks),
        }
    }

    fn use_case(&self) -> CommentPerFileUseCase<'_> {
        CommentPerFileUseCase {
            config_repo: &self.config,
            host_token_resolver: &self.token,
            pull_request_resolver: &self.pull_request,
            feedback_reader: &self.feedbacks,
            vcs_factory: &VcsFactoryAdapter,
            reporter: &SilentReporter,
        }
    }
}

fn feedback(file_name: &str, details: &str) -> Feedback {
    Feedback {
        file_name: file_name.to_string(),
        details: details.to_string(),
        risk_score: None,
    }
}

fn body(details: &str) -> String {
    format!("{details}\n\n---\n\n{SIGN_OFF}")
}

async fn mount_pull(server: &MockServer, existing: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(PULL))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "head": { "sha": "deadbeef" } })),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(COMMENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(existing))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn updates_existing_bot_comment_and_creates_missing_ones() {
    let server = MockServer::start().await;
    mount_pull(
        &server,
        json!([
            { "id": 10, "path": "src/lib.rs", "body": "a human comment" },
            { "id": 11, "path": "src/lib.rs", "body": body("old advice") },
            { "id": 12, "path": "src/main.rs", "body": "old\n\n---\n\nanother-bot" }
        ]),
    )
    .await;

    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/pulls/comments/11"))
        .and(body_json(json!({ "body": body("Avoid unwrap.") })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "path": "src/lib.rs", "body": body("Avoid unwrap.")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS))
        .and(body_json(json!({
            "body": body("Split main."),
            "commit_id": "deadbeef",
            "path": "src/main.rs",
            "subject_type": "file"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 20, "path": "src/main.rs", "body": body("Split main.")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(
        &server,
        vec![
            feedback(
                "/home/runner/work/widgets/widgets/src/lib.rs",
                "Avoid unwrap.",
            ),
            feedback("src/main.rs", "Split main."),
        ],
    );

    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.failed, 0);
    assert!(summary.skipped.is_none());
}

#[tokio::test]
async fn second_feedback_for_same_file_updates_the_new_comment() {
    let server = MockServer::start().await;
    mount_pull(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path(COMMENTS))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 30, "path": "src/lib.rs", "body": body("first")
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/acme/widgets/pulls/comments/30"))
        .and(body_json(json!({ "body": body("second") })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 30, "path": "src/lib.rs", "body": body("second")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(
        &server,
        vec![feedback("src/lib.rs", "first"), feedback("src/lib.rs", "second")],
    );

    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 1);
}

async fn mount_partially_failing_creates(server: &MockServer) {
    mount_pull(server, json!([])).await;
    Mock::given(method("POST"))
        .and(path(COMMENTS))
        .and(body_partial_json(json!({ "path": "deleted.rs" })))
        .respond_with(ResponseTemplate::new(422).set_body_string("path could not be resolved"))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(COMMENTS))
        .and(body_partial_json(json!({ "path": "src/lib.rs" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 40, "path": "src/lib.rs", "body": body("ok")
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn partially_failing_feedbacks() -> Vec<Feedback> {
    vec![
        feedback("deleted.rs", "gone"),
        feedback("", "no file"),
        feedback("src/lib.rs", "ok"),
    ]
}

#[tokio::test]
async fn failed_feedback_is_logged_and_the_rest_continue() {
    let server = MockServer::start().await;
    mount_partially_failing_creates(&server).await;

    let harness = Harness::new(&server, partially_failing_feedbacks());
    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.created, 1);
}

#[tokio::test]
async fn strict_mode_turns_failures_into_an_error() {
    let server = MockServer::start().await;
    mount_partially_failing_creates(&server).await;

    let harness = Harness::new(&server, partially_failing_feedbacks());
    let result = harness
        .use_case()
        .execute(RunOptions {
            strict: true,
            ..Default::default()
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("1 feedback(s) failed"));
}

#[tokio::test]
async fn not_a_pull_request_skips_without_requests() {
    let server = MockServer::start().await;
    let mut harness = Harness::new(&server, vec![feedback("src/lib.rs", "x")]);
    harness.pull_request.0.pull_request = None;

    let summary = harness
        .use_case()
        .execute(RunOptions {
            strict: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(summary.skipped, Some(SkipReason::NotPullRequest));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unavailable_pull_request_is_logged_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PULL))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, vec![feedback("src/lib.rs", "x")]);
    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.skipped, Some(SkipReason::PullRequestUnavailable));
    assert_eq!(summary.created + summary.updated, 0);
}

#[tokio::test]
async fn missing_token_aborts_before_any_request() {
    let server = MockServer::start().await;
    let mut harness = Harness::new(&server, vec![feedback("src/lib.rs", "x")]);
    harness.token = StaticToken(None);

    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.skipped, Some(SkipReason::PullRequestUnavailable));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn dry_run_reads_but_never_writes() {
    let server = MockServer::start().await;
    mount_pull(
        &server,
        json!([{ "id": 11, "path": "src/lib.rs", "body": body("old") }]),
    )
    .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(
        &server,
        vec![feedback("src/lib.rs", "new"), feedback("README.md", "typo")],
    );
    harness.token = StaticToken(None);

    let summary = harness
        .use_case()
        .execute(RunOptions {
            dry_run: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.created, 1);
}

#[tokio::test]
async fn cli_sign_off_overrides_config() {
    let server = MockServer::start().await;
    mount_pull(
        &server,
        json!([{ "id": 11, "path": "src/lib.rs", "body": body("old") }]),
    )
    .await;
    // 다른 sign-off이므로 기존 코멘트를 수정하지 않고 새로 만든다.
    Mock::given(method("POST"))
        .and(path(COMMENTS))
        .and(body_partial_json(json!({ "body": "new\n\n---\n\nother-bot" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12, "path": "src/lib.rs", "body": "new\n\n---\n\nother-bot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, vec![feedback("src/lib.rs", "new")]);
    let summary = harness
        .use_case()
        .execute(RunOptions {
            sign_off: Some("other-bot".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 0);
}

#[tokio::test]
async fn missing_token_is_checked_before_the_event_type() {
    let server = MockServer::start().await;
    let mut harness = Harness::new(&server, vec![feedback("src/lib.rs", "x")]);
    harness.token = StaticToken(None);
    harness.pull_request.0.pull_request = None;

    let summary = harness
        .use_case()
        .execute(RunOptions::default())
        .await
        .unwrap();
    assert_eq!(summary.skipped, Some(SkipReason::PullRequestUnavailable));

    let strict = harness
        .use_case()
        .execute(RunOptions {
            strict: true,
            ..Default::default()
        })
        .await;
    assert!(strict.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_failure_aborts_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PULL))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "head": { "sha": "deadbeef" } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COMMENTS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, vec![feedback("src/lib.rs", "x")]);
    let err = harness
        .use_case()
        .execute(RunOptions {
            strict: true,
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.to_string().contains("pull request unavailable"));
}
