use crate::models::{attributes, file_record_from_item, file_record_to_item};
use crate::retry::{retry_dynamodb_operation, RetryConfig};
use crate::store::{FileRecordStore, InsertOutcome};
use crate::DynamoDbClient;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use domain::{FileId, FileRecord};
use shared::telemetry::trace_dynamodb_operation;
use shared::AppError;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

/// FileRecord を DynamoDB に保存するリポジトリ
///
/// 書き込みは `attribute_not_exists(file_id)` 条件付きで行い、
/// 同時に届いた重複イベントが先行レコードを上書きしないようにする。
pub struct DynamoFileRepository {
    db: DynamoDbClient,
    retry: RetryConfig,
}

impl DynamoFileRepository {
    pub fn new(db: DynamoDbClient, retry: RetryConfig) -> Self {
        Self { db, retry }
    }

    pub fn table_name(&self) -> &str {
        self.db.table_name()
    }

    fn key(file_id: &FileId) -> AttributeValue {
        AttributeValue::S(file_id.as_str().to_string())
    }
}

#[async_trait]
impl FileRecordStore for DynamoFileRepository {
    async fn contains(&self, file_id: &FileId) -> Result<bool, AppError> {
        let output = trace_dynamodb_operation(self.db.table_name(), "GetItem", move || {
            retry_dynamodb_operation(
                move || async move {
                    self.db
                        .client()
                        .get_item()
                        .table_name(self.db.table_name())
                        .key(attributes::FILE_ID, Self::key(file_id))
                        .projection_expression(attributes::FILE_ID)
                        .consistent_read(true)
                        .send()
                        .await
                        .map_err(|e| self.db.convert_error(e))
                },
                &self.retry,
            )
        })
        .await?;

        Ok(output.item.is_some_and(|item| !item.is_empty()))
    }

    async fn get(&self, file_id: &FileId) -> Result<Option<FileRecord>, AppError> {
        let output = trace_dynamodb_operation(self.db.table_name(), "GetItem", move || {
            retry_dynamodb_operation(
                move || async move {
                    self.db
                        .client()
                        .get_item()
                        .table_name(self.db.table_name())
                        .key(attributes::FILE_ID, Self::key(file_id))
                        .consistent_read(true)
                        .send()
                        .await
                        .map_err(|e| self.db.convert_error(e))
                },
                &self.retry,
            )
        })
        .await?;

        output
            .item
            .filter(|item| !item.is_empty())
            .map(|item| file_record_from_item(&item))
            .transpose()
    }

    async fn insert(&self, record: &FileRecord) -> Result<InsertOutcome, AppError> {
        let item = file_record_to_item(record);
        let item = &item;
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;

        let outcome = trace_dynamodb_operation(self.db.table_name(), "PutItem", move || {
            retry_dynamodb_operation(
                move || async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    let result = self
                        .db
                        .client()
                        .put_item()
                        .table_name(self.db.table_name())
                        .set_item(Some(item.clone()))
                        .condition_expression("attribute_not_exists(#file_id)")
                        .expression_attribute_names("#file_id", attributes::FILE_ID)
                        .send()
                        .await;

                    match result {
                        Ok(_) => Ok(InsertOutcome::Inserted),
                        Err(e)
                            if e.as_service_error()
                                .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
                        {
                            debug!(file_id = %record.file_id, "Conditional put lost to an existing record");
                            Ok(InsertOutcome::AlreadyExists)
                        }
                        Err(e) => Err(self.db.convert_error(e)),
                    }
                },
                &self.retry,
            )
        })
        .await?;

        // 再試行で条件に負けた場合、先の試行自体が書き込みに成功していた可能性がある
        if outcome == InsertOutcome::AlreadyExists && attempts.load(Ordering::SeqCst) > 1 {
            let stored = self.get(&record.file_id).await?;
            return Ok(resolve_retried_conflict(record, stored.as_ref()));
        }

        Ok(outcome)
    }
}

/// 再試行後の条件失敗を判定する
///
/// 保存済みレコードが自分の書いた内容と一致すれば、前の試行が書き込んだものとみなす。
fn resolve_retried_conflict(record: &FileRecord, stored: Option<&FileRecord>) -> InsertOutcome {
    match stored {
        Some(stored) if stored == record => {
            debug!(file_id = %record.file_id, "Earlier put attempt had already stored this record");
            InsertOutcome::Inserted
        }
        _ => InsertOutcome::AlreadyExists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::UploadEvent;

    fn record(content_type: &str, uploaded_at: &str) -> FileRecord {
        let event = UploadEvent {
            bucket: "my-upload-bucket".to_string(),
            key: "uploads/report.pdf".to_string(),
            size: 102400,
        };
        let mut record = FileRecord::new(&event, content_type.to_string(), chrono::Utc::now());
        record.uploaded_at = uploaded_at.to_string();
        record
    }

    #[test]
    fn test_retried_put_that_stored_own_record_is_inserted() {
        let ours = record("application/pdf", "2025-03-01T09:00:00.123Z");

        assert_eq!(
            resolve_retried_conflict(&ours, Some(&ours.clone())),
            InsertOutcome::Inserted
        );
    }

    #[test]
    fn test_retried_put_against_other_writer_is_already_exists() {
        let ours = record("application/pdf", "2025-03-01T09:00:00.123Z");
        let theirs = record("application/pdf", "2025-03-01T09:00:00.045Z");

        assert_eq!(
            resolve_retried_conflict(&ours, Some(&theirs)),
            InsertOutcome::AlreadyExists
        );
        assert_eq!(resolve_retried_conflict(&ours, None), InsertOutcome::AlreadyExists);
    }
}
