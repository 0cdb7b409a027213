use crate::sdk_error::describe_sdk_error;
use crate::store::ObjectMetadataSource;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::Client;
use shared::AppError;

/// S3 HeadObject でオブジェクトのメタデータを取得する
#[derive(Debug, Clone)]
pub struct S3MetadataSource {
    client: Client,
}

impl S3MetadataSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl ObjectMetadataSource for S3MetadataSource {
    async fn content_type(&self, bucket: &str, key: &str) -> Result<Option<String>, AppError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(output) => Ok(output
                .content_type()
                .filter(|ct| !ct.is_empty())
                .map(str::to_string)),
            Err(e) => match &e {
                SdkError::ServiceError(service_err)
                    if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
                {
                    Err(AppError::ObjectStore(format!(
                        "object s3://{bucket}/{key} not found"
                    )))
                }
                _ => Err(AppError::ObjectStore(format!(
                    "HeadObject s3://{bucket}/{key} failed: {}",
                    describe_sdk_error(&e)
                ))),
            },
        }
    }
}
