//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SIGN_OFF: &str = "Generated by prfeedback";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 전역 기본값
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// VCS 호스트별 인증/엔드포인트 설정
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DefaultsConfig {
    /// 코멘트 말미 서명이자 기존 봇 코멘트 식별 키
    pub sign_off: Option<String>,
    /// 실패한 피드백이 있으면 비정상 종료할지 여부(기본 false)
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HostConfig {
    pub token: Option<String>,
    /// 토큰을 읽을 환경변수 이름(기본 `GITHUB_TOKEN`)
    pub token_env: Option<String>,
    pub api_base: Option<String>,
}

impl Config {
    pub fn sign_off(&self) -> String {
        self.defaults
            .sign_off
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SIGN_OFF)
            .to_string()
    }

    pub fn strict(&self) -> bool {
        self.defaults.strict.unwrap_or(false)
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(host)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.defaults.merge_from(other.defaults);

        for (host, incoming) in other.hosts {
            if let Some(existing) = self.hosts.get_mut(&host) {
                existing.merge_from(incoming);
            } else {
                self.hosts.insert(host, incoming);
            }
        }
    }
}

impl DefaultsConfig {
    pub fn merge_from(&mut self, other: DefaultsConfig) {
        if other.sign_off.is_some() {
            self.sign_off = other.sign_off;
        }
        if other.strict.is_some() {
            self.strict = other.strict;
        }
    }
}

impl HostConfig {
    pub fn token_env_name(&self) -> &str {
        self.token_env
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TOKEN_ENV)
    }

    pub fn merge_from(&mut self, other: HostConfig) {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.token_env.is_some() {
            self.token_env = other.token_env;
        }
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
    }
}
