//! 도메인 정책(코멘트 본문 구성, 기존 봇 코멘트 탐색, 경로 정규화).

use crate::domain::review::ReviewComment;

/// 피드백 본문 뒤에 구분선과 sign-off를 붙인다.
/// sign-off는 이후 실행에서 봇 코멘트를 찾는 키로도 쓰인다.
pub fn build_comment_body(details: &str, sign_off: &str) -> String {
    format!("{details}\n\n---\n\n{sign_off}")
}

/// 같은 파일에 같은 sign-off로 남긴 첫 번째 코멘트를 찾는다.
pub fn find_bot_comment<'a>(
    comments: &'a [ReviewComment],
    path: &str,
    sign_off: &str,
) -> Option<&'a ReviewComment> {
    comments
        .iter()
        .find(|c| c.path.as_deref() == Some(path) && c.body.contains(sign_off))
}

pub fn upsert_comment_cache(comments: &mut Vec<ReviewComment>, comment: ReviewComment) {
    if let Some(idx) = comments.iter().position(|c| c.id == comment.id) {
        comments[idx] = comment;
    } else {
        comments.push(comment);
    }
}

/// 피드백 파일명을 저장소 루트 기준 상대 경로로 바꾼다.
///
/// 1. 체크아웃 루트(`workspace`)로 시작하면 그 부분을 잘라낸다.
/// 2. 아니면 처음 나오는 `/<repo>/` 디렉터리(연속 반복 포함) 뒤쪽만 남긴다.
/// 3. 앞쪽의 `./`, `/`는 제거한다.
pub fn relative_path(file_name: &str, repo: &str, workspace: Option<&str>) -> String {
    let normalized = file_name.trim().replace('\\', "/");

    let from_workspace = workspace
        .map(|ws| ws.trim().replace('\\', "/"))
        .map(|ws| ws.trim_end_matches('/').to_string())
        .filter(|ws| !ws.is_empty())
        .and_then(|ws| strip_dir_prefix(&normalized, &ws));

    let rest = match from_workspace {
        Some(rest) => rest,
        None => after_repo_segment(&normalized, repo),
    };

    let mut rest = rest;
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}

fn strip_dir_prefix<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(dir)?;
    // `/work/app`가 `/work/application`에 매칭되지 않도록 경계를 확인한다.
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn after_repo_segment<'a>(path: &'a str, repo: &str) -> &'a str {
    if repo.is_empty() {
        return path;
    }
    let needle = format!("/{repo}/");
    let Some(idx) = path.find(&needle) else {
        return path;
    };

    // Actions 체크아웃은 `<repo>/<repo>/` 형태라 연속된 저장소 디렉터리만 건너뛴다.
    let segment = format!("{repo}/");
    let mut rest = &path[idx + needle.len()..];
    while let Some(stripped) = rest.strip_prefix(segment.as_str()) {
        rest = stripped;
    }
    rest
}
