use async_trait::async_trait;
use domain::{FileId, FileRecord};
use shared::AppError;
use std::sync::Arc;

/// 条件付き書き込みの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// 同じ file_id が既に存在していた（既存レコードは変更されない）
    AlreadyExists,
}

/// FileRecord の永続化先
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// file_id のレコードが存在するか
    async fn contains(&self, file_id: &FileId) -> Result<bool, AppError>;

    async fn get(&self, file_id: &FileId) -> Result<Option<FileRecord>, AppError>;

    /// file_id が未登録の場合に限り書き込む
    async fn insert(&self, record: &FileRecord) -> Result<InsertOutcome, AppError>;
}

/// オブジェクトストレージのメタデータ取得元
#[async_trait]
pub trait ObjectMetadataSource: Send + Sync {
    /// Content-Type を取得する。オブジェクトに Content-Type が無い場合は None
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, AppError>;
}

#[async_trait]
impl<T: FileRecordStore + ?Sized> FileRecordStore for Arc<T> {
    async fn contains(&self, file_id: &FileId) -> Result<bool, AppError> {
        (**self).contains(file_id).await
    }

    async fn get(&self, file_id: &FileId) -> Result<Option<FileRecord>, AppError> {
        (**self).get(file_id).await
    }

    async fn insert(&self, record: &FileRecord) -> Result<InsertOutcome, AppError> {
        (**self).insert(record).await
    }
}

#[async_trait]
impl<T: ObjectMetadataSource + ?Sized> ObjectMetadataSource for Arc<T> {
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, AppError> {
        (**self).content_type(bucket, key).await
    }
}
