#![allow(dead_code)]

use async_trait::async_trait;
use domain::{FileId, FileRecord};
use infrastructure::{FileRecordStore, InsertOutcome, ObjectMetadataSource};
use serde_json::Value;
use shared::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const BUCKET: &str = "my-upload-bucket";
pub const KEY: &str = "uploads/report.pdf";
pub const FILE_ID: &str = "my-upload-bucket#uploads/report.pdf";

/// tests/fixtures/s3_put_event.json（my-upload-bucket / uploads/report.pdf / 102400 bytes）
pub fn load_event() -> Value {
    serde_json::from_str(include_str!("../fixtures/s3_put_event.json")).unwrap()
}

pub fn seeded_record(uploaded_at: &str) -> FileRecord {
    FileRecord {
        file_id: FileId::new(BUCKET, KEY),
        bucket: BUCKET.to_string(),
        key: KEY.to_string(),
        size: 102400,
        content_type: "application/pdf".to_string(),
        uploaded_at: uploaded_at.to_string(),
    }
}

/// 条件付き書き込みを再現するインメモリのレコードストア
#[derive(Default)]
pub struct InMemoryFileStore {
    records: Mutex<HashMap<FileId, FileRecord>>,
    insert_calls: AtomicUsize,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: FileRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.file_id.clone(), record);
    }

    pub fn record(&self, file_id: &str) -> Option<FileRecord> {
        let id = FileId::from_string(file_id.to_string()).unwrap();
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileRecordStore for InMemoryFileStore {
    async fn contains(&self, file_id: &FileId) -> Result<bool, AppError> {
        Ok(self.records.lock().unwrap().contains_key(file_id))
    }

    async fn get(&self, file_id: &FileId) -> Result<Option<FileRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(file_id).cloned())
    }

    async fn insert(&self, record: &FileRecord) -> Result<InsertOutcome, AppError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.file_id) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        records.insert(record.file_id.clone(), record.clone());
        Ok(InsertOutcome::Inserted)
    }
}

/// 参照時には常に「未登録」を返す（参照と書き込みの間に割り込まれた状況の再現）
pub struct StaleReadStore<S>(pub S);

#[async_trait]
impl<S: FileRecordStore> FileRecordStore for StaleReadStore<S> {
    async fn contains(&self, _file_id: &FileId) -> Result<bool, AppError> {
        Ok(false)
    }

    async fn get(&self, _file_id: &FileId) -> Result<Option<FileRecord>, AppError> {
        Ok(None)
    }

    async fn insert(&self, record: &FileRecord) -> Result<InsertOutcome, AppError> {
        self.0.insert(record).await
    }
}

/// 参照・書き込みのどちらかを失敗させるストア
pub struct FailingStore {
    pub fail_lookup: bool,
    pub fail_insert: bool,
}

#[async_trait]
impl FileRecordStore for FailingStore {
    async fn contains(&self, _file_id: &FileId) -> Result<bool, AppError> {
        if self.fail_lookup {
            return Err(AppError::DynamoDb(
                "AccessDeniedException: not authorized to perform GetItem".to_string(),
            ));
        }
        Ok(false)
    }

    async fn get(&self, file_id: &FileId) -> Result<Option<FileRecord>, AppError> {
        self.contains(file_id).await.map(|_| None)
    }

    async fn insert(&self, _record: &FileRecord) -> Result<InsertOutcome, AppError> {
        if self.fail_insert {
            return Err(AppError::DynamoDb(
                "ResourceNotFoundException: Requested resource not found".to_string(),
            ));
        }
        Ok(InsertOutcome::Inserted)
    }
}

/// バケット/キーごとに Content-Type を返すメタデータソース
#[derive(Default)]
pub struct StaticMetadataSource {
    objects: HashMap<(String, String), Option<String>>,
    unreachable: bool,
    calls: AtomicUsize,
}

impl StaticMetadataSource {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_object(bucket: &str, key: &str, content_type: Option<&str>) -> Self {
        let mut source = Self::default();
        source.objects.insert(
            (bucket.to_string(), key.to_string()),
            content_type.map(str::to_string),
        );
        source
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectMetadataSource for StaticMetadataSource {
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.unreachable {
            return Err(AppError::ObjectStore(
                "HeadObject failed: dispatch failure".to_string(),
            ));
        }

        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| AppError::ObjectStore(format!("object s3://{bucket}/{key} not found")))
    }
}
