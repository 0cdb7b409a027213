use aws_sdk_dynamodb::types::AttributeValue;
use domain::{FileId, FileRecord};
use shared::AppError;
use std::collections::HashMap;

/// テーブルの属性名
pub mod attributes {
    /// パーティションキー
    pub const FILE_ID: &str = "file_id";
    pub const BUCKET: &str = "bucket";
    pub const KEY: &str = "key";
    pub const SIZE: &str = "size";
    pub const CONTENT_TYPE: &str = "content_type";
    pub const UPLOADED_AT: &str = "uploaded_at";
}

pub type Item = HashMap<String, AttributeValue>;

/// FileRecord を DynamoDB のフラットなアイテムに変換
pub fn file_record_to_item(record: &FileRecord) -> Item {
    let mut item = HashMap::new();
    item.insert(
        attributes::FILE_ID.to_string(),
        AttributeValue::S(record.file_id.as_str().to_string()),
    );
    item.insert(
        attributes::BUCKET.to_string(),
        AttributeValue::S(record.bucket.clone()),
    );
    item.insert(attributes::KEY.to_string(), AttributeValue::S(record.key.clone()));
    item.insert(
        attributes::SIZE.to_string(),
        AttributeValue::N(record.size.to_string()),
    );
    item.insert(
        attributes::CONTENT_TYPE.to_string(),
        AttributeValue::S(record.content_type.clone()),
    );
    item.insert(
        attributes::UPLOADED_AT.to_string(),
        AttributeValue::S(record.uploaded_at.clone()),
    );
    item
}

/// DynamoDB のアイテムから FileRecord を復元
pub fn file_record_from_item(item: &Item) -> Result<FileRecord, AppError> {
    let file_id = FileId::from_string(string_attr(item, attributes::FILE_ID)?)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    let size_raw = item
        .get(attributes::SIZE)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| missing(attributes::SIZE))?;
    let size = size_raw.parse::<u64>().map_err(|e| {
        AppError::Serialization(format!("attribute {} is not a valid size: {e}", attributes::SIZE))
    })?;

    Ok(FileRecord {
        file_id,
        bucket: string_attr(item, attributes::BUCKET)?,
        key: string_attr(item, attributes::KEY)?,
        size,
        content_type: string_attr(item, attributes::CONTENT_TYPE)?,
        uploaded_at: string_attr(item, attributes::UPLOADED_AT)?,
    })
}

fn string_attr(item: &Item, name: &str) -> Result<String, AppError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| missing(name))
}

fn missing(name: &str) -> AppError {
    AppError::Serialization(format!("attribute {name} is missing or has the wrong type"))
}
