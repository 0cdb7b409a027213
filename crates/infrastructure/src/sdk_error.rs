//! DynamoDB と S3 で共通の SDK エラー整形

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::fmt::Debug;

/// エラーコードを先頭に含めたメッセージを作る（リトライ判定はコード名で行うため）
pub fn describe_sdk_error<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let service_error = error.as_service_error();
    match (
        service_error.and_then(|se| se.code()),
        service_error.and_then(|se| se.message()),
    ) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(error).to_string(),
    }
}
