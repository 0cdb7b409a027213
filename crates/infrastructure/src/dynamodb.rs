use crate::sdk_error::describe_sdk_error;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::Client;
use shared::AppError;
use std::fmt::Debug;

/// AWS SDK の共通設定を読み込む（リージョン・認証情報・エンドポイントは環境から解決）
pub async fn load_aws_config() -> SdkConfig {
    aws_config::load_defaults(BehaviorVersion::latest()).await
}

#[derive(Debug, Clone)]
pub struct DynamoDbClient {
    client: Client,
    table_name: String,
}

impl DynamoDbClient {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// SDK エラーを AppError::DynamoDb に変換
    pub fn convert_error<E, R>(&self, error: SdkError<E, R>) -> AppError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: Debug,
    {
        AppError::DynamoDb(format!("{} ({})", describe_sdk_error(&error), self.table_name))
    }
}
