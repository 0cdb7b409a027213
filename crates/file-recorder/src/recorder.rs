use chrono::Utc;
use domain::{FileRecord, RecordOutcome, UploadEvent, DEFAULT_CONTENT_TYPE};
use infrastructure::{FileRecordStore, InsertOutcome, ObjectMetadataSource};
use shared::AppError;
use tracing::{debug, info, instrument, warn};

/// Content-Type の取得結果（取得できなければ既定値と診断メッセージ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeLookup {
    pub content_type: String,
    pub diagnostic: Option<String>,
}

impl ContentTypeLookup {
    fn found(content_type: String) -> Self {
        Self {
            content_type,
            diagnostic: None,
        }
    }

    fn fallback(diagnostic: Option<String>) -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            diagnostic,
        }
    }
}

/// アップロード通知を重複なく記録する
pub struct UploadRecorder<S, M> {
    store: S,
    metadata: M,
}

impl<S, M> UploadRecorder<S, M>
where
    S: FileRecordStore,
    M: ObjectMetadataSource,
{
    pub fn new(store: S, metadata: M) -> Self {
        Self { store, metadata }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 未登録の file_id であればレコードを作成する
    ///
    /// 既存レコードがある場合はメタデータ取得も書き込みも行わない。
    /// 参照と書き込みの間に別の呼び出しが先に書き込んだ場合も AlreadyExists を返す。
    #[instrument(skip(self, event), fields(file_id = %event.file_id()))]
    pub async fn record(&self, event: &UploadEvent) -> Result<RecordOutcome, AppError> {
        let file_id = event.file_id();

        if self.store.contains(&file_id).await? {
            info!(file_id = %file_id, "File already recorded, skipping");
            return Ok(RecordOutcome::AlreadyExists(file_id));
        }

        let lookup = self.fetch_content_type(&event.bucket, &event.key).await;
        let record = FileRecord::new(event, lookup.content_type, Utc::now());

        match self.store.insert(&record).await? {
            InsertOutcome::Inserted => {
                info!(
                    file_id = %file_id,
                    size = event.size,
                    content_type = %record.content_type,
                    "File recorded successfully"
                );
                Ok(RecordOutcome::Created(file_id))
            }
            InsertOutcome::AlreadyExists => {
                info!(
                    file_id = %file_id,
                    "File recorded by a concurrent invocation, skipping"
                );
                Ok(RecordOutcome::AlreadyExists(file_id))
            }
        }
    }

    /// オブジェクトの Content-Type を取得する（失敗しても既定値で続行）
    pub async fn fetch_content_type(&self, bucket: &str, key: &str) -> ContentTypeLookup {
        match self.metadata.content_type(bucket, key).await {
            Ok(Some(content_type)) => ContentTypeLookup::found(content_type),
            Ok(None) => {
                debug!(bucket, key, "Object has no content type, using default");
                ContentTypeLookup::fallback(None)
            }
            Err(e) => {
                warn!(
                    bucket,
                    key,
                    error = %e,
                    "Failed to get file metadata from S3, using defaults"
                );
                ContentTypeLookup::fallback(Some(e.to_string()))
            }
        }
    }
}
