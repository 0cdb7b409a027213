use thiserror::Error;

/// アップロードイベントの検証エラー
///
/// どのフィールドが欠けていたかを呼び出し側で判別できるよう、
/// フィールドパスをそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Malformed S3 event: {0}")]
    MalformedEvent(String),

    #[error("S3 event contains no records")]
    NoRecords,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Object size must be non-negative: {0}")]
    NegativeSize(i64),

    #[error("Invalid file record: {0}")]
    InvalidRecord(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
