//! 애플리케이션 유스케이스 모음.

pub mod comment_per_file;
pub mod inspect_config;
