use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アプリケーション全体で使用されるエラー型
#[derive(Debug, Clone, Error)]
pub enum AppError {
    // 設定エラー（致命的）
    #[error("Configuration error: {0}")]
    Configuration(String),

    // 入力イベントの検証エラー
    #[error("Validation failed: {0}")]
    Validation(#[from] domain::DomainError),

    // インフラストラクチャエラー
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("S3 error: {0}")]
    ObjectStore(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// エラーの分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// クライアントエラー（4xx相当）
    Client,
    /// サーバーエラー（5xx相当）
    Server,
    /// 一時的なエラー（リトライ可能）
    Transient,
}

/// エラーの重要度
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// エラーメタデータ
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: String,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub retryable: bool,
}

impl AppError {
    pub fn metadata(&self) -> ErrorMetadata {
        match self {
            AppError::Configuration(_) => ErrorMetadata {
                code: "CONFIGURATION_ERROR".to_string(),
                category: ErrorCategory::Server,
                severity: ErrorSeverity::Critical,
                retryable: false,
            },

            AppError::Validation(_) => ErrorMetadata {
                code: "VALIDATION_ERROR".to_string(),
                category: ErrorCategory::Client,
                severity: ErrorSeverity::Warning,
                retryable: false,
            },

            AppError::DynamoDb(msg) => {
                let retryable = is_dynamodb_retryable(msg);
                ErrorMetadata {
                    code: "DYNAMODB_ERROR".to_string(),
                    category: if retryable {
                        ErrorCategory::Transient
                    } else {
                        ErrorCategory::Server
                    },
                    severity: ErrorSeverity::Error,
                    retryable,
                }
            }

            AppError::ObjectStore(_) => ErrorMetadata {
                code: "S3_ERROR".to_string(),
                category: ErrorCategory::Server,
                severity: ErrorSeverity::Warning,
                retryable: false,
            },

            AppError::Serialization(_) => ErrorMetadata {
                code: "SERIALIZATION_ERROR".to_string(),
                category: ErrorCategory::Server,
                severity: ErrorSeverity::Error,
                retryable: false,
            },
        }
    }

    /// 依存サービス（DynamoDB / S3）起因のエラーかどうか
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AppError::DynamoDb(_) | AppError::ObjectStore(_))
    }

    pub fn is_retryable(&self) -> bool {
        self.metadata().retryable
    }

    /// HTTPステータスコード相当の値
    pub fn http_status_code(&self) -> u16 {
        match self.metadata().category {
            ErrorCategory::Client => 400,
            ErrorCategory::Server => 500,
            ErrorCategory::Transient => 503,
        }
    }
}

/// DynamoDBエラーがリトライ可能かどうかを判定
fn is_dynamodb_retryable(error_message: &str) -> bool {
    let retryable_errors = [
        "ThrottlingException",
        "ProvisionedThroughputExceededException",
        "ServiceUnavailable",
        "InternalServerError",
        "RequestLimitExceeded",
    ];

    retryable_errors
        .iter()
        .any(|&err| error_message.contains(err))
}

/// Lambda の失敗として返すエラー本文
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn from_app_error(error: &AppError, request_id: Option<String>) -> Self {
        Self {
            code: error.metadata().code,
            message: error.to_string(),
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::Serialization(e.to_string()))
    }
}
