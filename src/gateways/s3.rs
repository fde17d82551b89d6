use crate::{settings::Settings, usecases::gateways::Storage};
use async_trait::async_trait;
use aws_sdk_s3::{config::Region, primitives::ByteStream, Client};
use std::sync::Arc;

struct S3Impl {
    settings: Arc<Settings>,
    client: Client,
}

pub async fn new(settings: Arc<Settings>) -> impl Storage {
    let config = aws_config::from_env()
        .region(Region::new(settings.region()))
        .endpoint_url(settings.endpoint())
        .load()
        .await;
    let client = aws_sdk_s3::Client::new(&config);

    S3Impl { settings, client }
}

#[async_trait]
impl Storage for S3Impl {
    async fn save(
        &self,
        owner_id: u64,
        path: String,
        content_type: String,
        body: Vec<u8>,
    ) -> Result<String, String> {
        return match self
            .client
            .put_object()
            .bucket(self.settings.bucket())
            .key(&path)
            .content_type(content_type)
            .content_length(body.len() as i64)
            .metadata("userId", owner_id.to_string())
            .body(ByteStream::from(body))
            .send()
            .await
        {
            Ok(_) => Ok(path),
            Err(e) => Err(format!("could not upload avatar: {}", e)),
        };
    }

    async fn load(&self, path: String) -> Result<Vec<u8>, String> {
        let object = self
            .client
            .get_object()
            .bucket(self.settings.bucket())
            .key(&path)
            .send()
            .await
            .map_err(|e| format!("could not get object {}: {}", path, e))?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| format!("could not read object body: {}", e))?;

        Ok(body.into_bytes().to_vec())
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.settings.storage_external_url(),
            self.settings.bucket(),
            path
        )
    }
}
