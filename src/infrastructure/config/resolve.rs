//! 설정 값(token/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::{DEFAULT_TOKEN_ENV, HostConfig};
use crate::application::ports::HostTokenResolution;

/// Host(VCS) 토큰을 해석한다. inline `token` 우선, 없으면 `token_env`(기본 `GITHUB_TOKEN`).
pub fn resolve_host_token(host_cfg: Option<&HostConfig>) -> HostTokenResolution {
    resolve_host_token_with(host_cfg, |name| env::var(name).ok())
}

pub(crate) fn resolve_host_token_with(
    host_cfg: Option<&HostConfig>,
    lookup: impl Fn(&str) -> Option<String>,
) -> HostTokenResolution {
    if let Some(token) = host_cfg
        .and_then(|cfg| cfg.token.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return HostTokenResolution {
            token: Some(token.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let env_name = host_cfg
        .map(HostConfig::token_env_name)
        .unwrap_or(DEFAULT_TOKEN_ENV);

    match lookup(env_name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => HostTokenResolution {
            token: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => HostTokenResolution {
            token: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
