use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// file_id の区切り文字
pub const FILE_ID_SEPARATOR: char = '#';

/// バケットとキーから導出される自然キー（`bucket#key`）
///
/// バケット名・キーはエスケープせずにそのまま連結する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(bucket: &str, key: &str) -> Self {
        Self(format!("{bucket}{FILE_ID_SEPARATOR}{key}"))
    }

    /// 保存済みの値から復元する
    pub fn from_string(id: String) -> DomainResult<Self> {
        if id.is_empty() {
            return Err(DomainError::InvalidRecord("file_id is empty".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 検証済みのアップロード通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}

impl UploadEvent {
    /// 通知から取り出した生の値を検証して UploadEvent を組み立てる
    pub fn new(bucket: Option<String>, key: Option<String>, size: Option<i64>) -> DomainResult<Self> {
        let bucket = require_non_empty(bucket, "s3.bucket.name")?;
        let key = require_non_empty(key, "s3.object.key")?;
        let size = size.ok_or(DomainError::MissingField("s3.object.size"))?;
        let size = u64::try_from(size).map_err(|_| DomainError::NegativeSize(size))?;

        Ok(Self { bucket, key, size })
    }

    pub fn file_id(&self) -> FileId {
        FileId::new(&self.bucket, &self.key)
    }
}

fn require_non_empty(value: Option<String>, field: &'static str) -> DomainResult<String> {
    match value {
        None => Err(DomainError::MissingField(field)),
        Some(v) if v.is_empty() => Err(DomainError::EmptyField(field)),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_derivation() {
        let id = FileId::new("my-upload-bucket", "uploads/report.pdf");
        assert_eq!(id.as_str(), "my-upload-bucket#uploads/report.pdf");
        assert_eq!(id.to_string(), "my-upload-bucket#uploads/report.pdf");
    }

    #[test]
    fn test_file_id_does_not_escape_special_characters() {
        let id = FileId::new("bucket", "a#b/c d+e%20");
        assert_eq!(id.as_str(), "bucket#a#b/c d+e%20");
    }

    #[test]
    fn test_upload_event_validation() {
        let event = UploadEvent::new(
            Some("my-upload-bucket".to_string()),
            Some("uploads/report.pdf".to_string()),
            Some(102400),
        )
        .unwrap();
        assert_eq!(event.size, 102400);
        assert_eq!(event.file_id().as_str(), "my-upload-bucket#uploads/report.pdf");

        // サイズ0は有効
        assert!(UploadEvent::new(Some("b".into()), Some("k".into()), Some(0)).is_ok());
    }

    #[test]
    fn test_upload_event_rejects_missing_or_invalid_fields() {
        assert_eq!(
            UploadEvent::new(None, Some("k".into()), Some(1)),
            Err(DomainError::MissingField("s3.bucket.name"))
        );
        assert_eq!(
            UploadEvent::new(Some(String::new()), Some("k".into()), Some(1)),
            Err(DomainError::EmptyField("s3.bucket.name"))
        );
        assert_eq!(
            UploadEvent::new(Some("b".into()), None, Some(1)),
            Err(DomainError::MissingField("s3.object.key"))
        );
        assert_eq!(
            UploadEvent::new(Some("b".into()), Some("k".into()), None),
            Err(DomainError::MissingField("s3.object.size"))
        );
        assert_eq!(
            UploadEvent::new(Some("b".into()), Some("k".into()), Some(-5)),
            Err(DomainError::NegativeSize(-5))
        );
    }

    #[test]
    fn test_file_id_from_empty_string_is_rejected() {
        assert!(FileId::from_string(String::new()).is_err());
        assert!(FileId::from_string("b#k".to_string()).is_ok());
    }
}
