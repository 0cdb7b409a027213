use std::collections::HashMap;

use crate::errors::{AppError, ErrorResponse, ErrorSeverity};

/// Lambda関数用のエラーハンドリングユーティリティ
pub struct LambdaErrorHandler;

impl LambdaErrorHandler {
    /// AppError を Lambda ランタイムに返すエラーへ変換
    ///
    /// メッセージにはエラーコードと原因（欠けていたフィールド・失敗した依存先）を含める。
    pub fn to_lambda_error(error: &AppError, request_id: Option<String>) -> lambda_runtime::Error {
        let body = ErrorResponse::from_app_error(error, request_id)
            .to_json()
            .unwrap_or_else(|_| error.to_string());

        lambda_runtime::Error::from(format!("{}: {}", error.metadata().code, body))
    }

    /// エラーを重要度に応じたレベルでログに記録
    pub fn log_error(error: &AppError, context: Option<HashMap<String, String>>) {
        let metadata = error.metadata();

        match metadata.severity {
            ErrorSeverity::Critical => {
                tracing::error!(
                    error = %error,
                    code = %metadata.code,
                    category = ?metadata.category,
                    retryable = metadata.retryable,
                    context = ?context,
                    "Critical error occurred"
                );
            }
            ErrorSeverity::Error => {
                tracing::error!(
                    error = %error,
                    code = %metadata.code,
                    category = ?metadata.category,
                    retryable = metadata.retryable,
                    context = ?context,
                    "Error occurred"
                );
            }
            ErrorSeverity::Warning => {
                tracing::warn!(
                    error = %error,
                    code = %metadata.code,
                    category = ?metadata.category,
                    retryable = metadata.retryable,
                    context = ?context,
                    "Warning occurred"
                );
            }
            ErrorSeverity::Info => {
                tracing::info!(
                    error = %error,
                    code = %metadata.code,
                    category = ?metadata.category,
                    context = ?context,
                    "Info level error occurred"
                );
            }
        }
    }
}
