use crate::errors::AppError;
use std::env;

/// 記録先テーブル名の環境変数
pub const FILES_TABLE_ENV: &str = "FILES_TABLE";

#[derive(Debug, Clone)]
pub struct Config {
    pub files_table: String,
    pub environment: String,
    pub retry_max_attempts: u32,
    pub retry_initial_delay_ms: u64,
}

impl Config {
    /// 環境変数から設定を読み込む
    ///
    /// FILES_TABLE が未設定・空の場合は設定エラーとして即座に失敗する。
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意のルックアップ関数から設定を組み立てる（テスト用に環境変数を差し替え可能）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let files_table = lookup(FILES_TABLE_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "{FILES_TABLE_ENV} environment variable is required"
                ))
            })?;

        let retry_max_attempts = parse_or(&lookup, "RETRY_MAX_ATTEMPTS", 3u32)?;
        if retry_max_attempts == 0 {
            return Err(AppError::Configuration(
                "RETRY_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        Ok(Config {
            files_table,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),
            retry_max_attempts,
            retry_initial_delay_ms: parse_or(&lookup, "RETRY_INITIAL_DELAY_MS", 100u64)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Configuration(format!("{name}={raw:?} is invalid: {e}"))),
    }
}
