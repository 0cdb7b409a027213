use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// トレーシングサブスクライバーを初期化
/// X-Ray統合は環境変数とLambdaランタイムで自動的に処理される
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 構造化ログ出力でCloudWatchに送信
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time() // CloudWatch 側で取り込み時刻が付与される
                .json(),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
