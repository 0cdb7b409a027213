use crate::upload::{FileId, UploadEvent};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// メタデータが取得できなかった場合の Content-Type
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// アップロード済みファイルの記録（1 file_id につき 1 件、作成後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_id: FileId,
    pub bucket: String,
    pub key: String,
    pub size: u64,
    pub content_type: String,
    /// ISO-8601 (UTC)。保存済みの値は書式を含めてそのまま保持する
    pub uploaded_at: String,
}

impl FileRecord {
    pub fn new(event: &UploadEvent, content_type: String, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            file_id: event.file_id(),
            bucket: event.bucket.clone(),
            key: event.key.clone(),
            size: event.size,
            content_type,
            uploaded_at: format_timestamp(uploaded_at),
        }
    }
}

/// `2025-03-01T09:00:00.000Z` 形式
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 記録処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Created(FileId),
    AlreadyExists(FileId),
}

impl RecordOutcome {
    pub fn file_id(&self) -> &FileId {
        match self {
            RecordOutcome::Created(id) | RecordOutcome::AlreadyExists(id) => id,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RecordOutcome::Created(_) => "File recorded successfully",
            RecordOutcome::AlreadyExists(_) => "File already recorded",
        }
    }
}
