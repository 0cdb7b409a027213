use shared::{AppError, Config};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// リトライ設定
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 最大試行回数
    pub max_attempts: u32,
    /// 初期待機時間（ミリ秒）
    pub initial_delay_ms: u64,
    /// 指数バックオフの倍率
    pub backoff_multiplier: f64,
    /// 最大待機時間（ミリ秒）
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 100,
            backoff_multiplier: 2.0,
            max_delay_ms: 5000,
        }
    }
}

impl From<&Config> for RetryConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            initial_delay_ms: config.retry_initial_delay_ms,
            ..Self::default()
        }
    }
}

/// 指数バックオフによるリトライ実行
/// リトライ可能なエラーに対してのみリトライを実行
pub async fn retry_with_backoff<F, Fut, T, E>(
    operation: F,
    config: &RetryConfig,
    is_retryable: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay_ms;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => match next_step(attempt, config.max_attempts, is_retryable(&error)) {
                RetryStep::GiveUp => {
                    debug!(error = %error, "Non-retryable error");
                    return Err(error);
                }
                RetryStep::LimitReached => {
                    warn!(
                        max_attempts = config.max_attempts,
                        error = %error,
                        "Retry limit reached"
                    );
                    return Err(error);
                }
                RetryStep::Backoff => {
                    warn!(
                        attempt,
                        delay_ms = delay,
                        error = %error,
                        "Retryable error, backing off"
                    );

                    sleep(Duration::from_millis(delay)).await;

                    delay = ((delay as f64) * config.backoff_multiplier) as u64;
                    delay = delay.min(config.max_delay_ms);
                }
            },
        }
    }
}

/// 失敗した試行の後にどうするか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryStep {
    /// リトライ対象外のエラー
    GiveUp,
    /// リトライ対象だが試行回数を使い切った
    LimitReached,
    Backoff,
}

fn next_step(attempt: u32, max_attempts: u32, retryable: bool) -> RetryStep {
    if !retryable {
        RetryStep::GiveUp
    } else if attempt >= max_attempts {
        RetryStep::LimitReached
    } else {
        RetryStep::Backoff
    }
}

/// DynamoDB 操作用のリトライヘルパー（スロットリング等の一時的エラーのみ再試行）
pub async fn retry_dynamodb_operation<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    retry_with_backoff(operation, config, AppError::is_retryable).await
}
