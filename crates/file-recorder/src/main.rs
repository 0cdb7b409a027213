use file_recorder::{handle_event, RecordResponse, UploadRecorder};
use infrastructure::{load_aws_config, DynamoDbClient, DynamoFileRepository, RetryConfig, S3MetadataSource};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::telemetry::{record_environment, trace_lambda_handler, LambdaTraceContext};
use shared::{init_tracing, Config, LambdaErrorHandler};
use tracing::info;

/// コールドスタート時に一度だけ作成し、呼び出し間で使い回すクライアント
struct AwsClients {
    dynamodb: aws_sdk_dynamodb::Client,
    metadata: S3MetadataSource,
}

/// Lambda関数のエントリーポイント
async fn function_handler(
    event: LambdaEvent<Value>,
    clients: &AwsClients,
) -> Result<RecordResponse, Error> {
    let (payload, context) = event.into_parts();
    let trace_context = LambdaTraceContext::from_lambda_context(&context);

    let result = trace_lambda_handler("file-recorder", &trace_context, async {
        // 設定が無ければ何も処理せずに失敗させる
        let config = Config::from_env()?;
        record_environment(&config.environment);
        info!(
            environment = %config.environment,
            files_table = %config.files_table,
            "Configuration loaded"
        );

        let repository = DynamoFileRepository::new(
            DynamoDbClient::new(clients.dynamodb.clone(), config.files_table.clone()),
            RetryConfig::from(&config),
        );
        let recorder = UploadRecorder::new(repository, clients.metadata.clone());

        handle_event(&recorder, payload).await
    })
    .await;

    result.map_err(|e| {
        LambdaErrorHandler::log_error(&e, None);
        LambdaErrorHandler::to_lambda_error(&e, Some(trace_context.request_id.clone()))
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let sdk_config = load_aws_config().await;
    let clients = AwsClients {
        dynamodb: aws_sdk_dynamodb::Client::new(&sdk_config),
        metadata: S3MetadataSource::from_sdk_config(&sdk_config),
    };

    info!("File recorder starting...");

    run(service_fn(|event| function_handler(event, &clients))).await
}
