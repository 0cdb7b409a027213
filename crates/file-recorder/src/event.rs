use domain::{DomainError, DomainResult, UploadEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// S3 通知のうち記録に必要な部分だけを読むモデル
///
/// eventTime や userIdentity などそれ以外のフィールドは無視する。
#[derive(Debug, Deserialize)]
struct S3Notification {
    #[serde(rename = "Records")]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    s3: Option<S3Entity>,
}

#[derive(Debug, Default, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Default, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct S3Object {
    key: Option<String>,
    size: Option<i64>,
}

/// Lambda のペイロードを S3 イベントとして解釈し、UploadEvent を取り出す
///
/// 1 回の呼び出しで記録するのは先頭の通知のみ。2 件目以降は件数を警告ログに残して無視する。
pub fn parse_upload_event(payload: Value) -> DomainResult<UploadEvent> {
    let notification: S3Notification =
        serde_json::from_value(payload).map_err(|e| DomainError::MalformedEvent(e.to_string()))?;

    let mut records = notification.records.into_iter();
    let first = records.next().ok_or(DomainError::NoRecords)?;

    let ignored = records.count();
    if ignored > 0 {
        warn!(
            ignored_records = ignored,
            "S3 event carries multiple records, only the first one is recorded"
        );
    }

    let entity = first.s3.unwrap_or_default();
    let bucket = entity.bucket.unwrap_or_default();
    let object = entity.object.unwrap_or_default();
    UploadEvent::new(bucket.name, object.key, object.size)
}
