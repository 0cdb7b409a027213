use crate::event::parse_upload_event;
use crate::recorder::UploadRecorder;
use crate::response::RecordResponse;
use infrastructure::{FileRecordStore, ObjectMetadataSource};
use serde_json::Value;
use shared::AppError;

/// 1 件の Lambda ペイロードを処理する
///
/// 不正なイベントは AppError::Validation、DynamoDB の失敗はそのまま呼び出し元へ返す。
pub async fn handle_event<S, M>(
    recorder: &UploadRecorder<S, M>,
    payload: Value,
) -> Result<RecordResponse, AppError>
where
    S: FileRecordStore,
    M: ObjectMetadataSource,
{
    let event = parse_upload_event(payload)?;
    let outcome = recorder.record(&event).await?;
    RecordResponse::from_outcome(&outcome)
}
