use crate::errors::AppError;
use lambda_runtime::Context;
use std::future::Future;
use std::time::Instant;
use tracing::{error, info, Instrument};

/// Lambda 関数のトレーシング情報
#[derive(Debug, Clone)]
pub struct LambdaTraceContext {
    pub function_name: String,
    pub function_version: String,
    pub request_id: String,
    pub trace_id: Option<String>,
}

impl LambdaTraceContext {
    /// Lambda Context からトレーシング情報を抽出
    pub fn from_lambda_context(context: &Context) -> Self {
        Self {
            function_name: context.env_config.function_name.clone(),
            function_version: context.env_config.version.clone(),
            request_id: context.request_id.clone(),
            trace_id: context
                .xray_trace_id
                .clone()
                .or_else(|| std::env::var("_X_AMZN_TRACE_ID").ok()),
        }
    }
}

/// Lambda 関数用のスパンを作成
pub fn create_lambda_span(handler_name: &str, trace_context: &LambdaTraceContext) -> tracing::Span {
    tracing::span!(
        tracing::Level::INFO,
        "lambda_handler",
        handler = handler_name,
        function_name = %trace_context.function_name,
        function_version = %trace_context.function_version,
        request_id = %trace_context.request_id,
        trace_id = %trace_context.trace_id.as_deref().unwrap_or("none"),
        environment = tracing::field::Empty
    )
}

/// 設定読み込み後にデプロイステージを現在のスパンへ記録する
pub fn record_environment(environment: &str) {
    tracing::Span::current().record("environment", environment);
}

/// ハンドラー本体をスパン内で実行し、開始・終了をログに残す
pub async fn trace_lambda_handler<T, Fut>(
    handler_name: &str,
    trace_context: &LambdaTraceContext,
    handler: Fut,
) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    let span = create_lambda_span(handler_name, trace_context);

    async move {
        let start_time = Instant::now();
        info!("Lambda function started");

        let result = handler.await;

        match &result {
            Ok(_) => info!(
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Lambda function completed successfully"
            ),
            Err(e) => error!(
                error = %e,
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Lambda function failed"
            ),
        }

        result
    }
    .instrument(span)
    .await
}

/// DynamoDB 操作をトレース
pub async fn trace_dynamodb_operation<T, F, Fut>(
    table_name: &str,
    operation_name: &str,
    operation: F,
) -> Result<T, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let start_time = Instant::now();
    let result = operation().await;
    let duration = start_time.elapsed();

    match &result {
        Ok(_) => {
            info!(
                table = table_name,
                operation = operation_name,
                duration_ms = duration.as_millis() as u64,
                "DynamoDB operation completed successfully"
            );
        }
        Err(e) => {
            error!(
                table = table_name,
                operation = operation_name,
                duration_ms = duration.as_millis() as u64,
                error = %e,
                "DynamoDB operation failed"
            );
        }
    }

    result
}
