//! AI 피드백 JSON 입력 어댑터.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::FeedbackReader;
use crate::domain::review::Feedback;

/// 파일 또는 stdin에서 피드백 배열을 읽는다.
pub struct JsonFeedbackReader;

impl FeedbackReader for JsonFeedbackReader {
    fn read(&self, path: Option<&str>) -> Result<Vec<Feedback>> {
        let raw = match path.map(str::trim).filter(|p| !p.is_empty() && *p != "-") {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read feedback file at {path}"))?,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read feedbacks from stdin")?;
                buf
            }
        };
        parse_feedbacks(&raw)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackDto {
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    details: String,
    #[serde(default)]
    risk_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedbackDocument {
    List(Vec<FeedbackDto>),
    Wrapped { feedbacks: Vec<FeedbackDto> },
}

/// `[...]` 또는 `{ "feedbacks": [...] }` 형식을 모두 받는다.
pub fn parse_feedbacks(raw: &str) -> Result<Vec<Feedback>> {
    let document: FeedbackDocument =
        serde_json::from_str(raw.trim()).context("invalid feedback JSON")?;
    let items = match document {
        FeedbackDocument::List(items) => items,
        FeedbackDocument::Wrapped { feedbacks } => feedbacks,
    };

    Ok(items
        .into_iter()
        .map(|dto| Feedback {
            file_name: dto.file_name,
            details: dto.details,
            risk_score: dto.risk_score,
        })
        .collect())
}
