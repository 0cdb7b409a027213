use domain::RecordOutcome;
use serde::{Deserialize, Serialize};
use shared::AppError;

/// レスポンス本文（JSON 文字列として body に格納される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    pub file_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl RecordResponse {
    /// 作成・既存どちらの結果も 200 を返し、メッセージで区別する
    pub fn from_outcome(outcome: &RecordOutcome) -> Result<Self, AppError> {
        let body = ResponseBody {
            message: outcome.message().to_string(),
            file_id: outcome.file_id().to_string(),
        };

        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(&body)
                .map_err(|e| AppError::Serialization(e.to_string()))?,
        })
    }

    pub fn parsed_body(&self) -> Result<ResponseBody, AppError> {
        serde_json::from_str(&self.body).map_err(|e| AppError::Serialization(e.to_string()))
    }
}
