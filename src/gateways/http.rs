use std::{sync::Arc, time::Duration};

use crate::{
    common::error::AvatarError,
    settings::Settings,
    usecases::gateways::AvatarFetcher,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use sha2::{Digest, Sha256};

const MAX_BODY_SIZE: usize = 3 * 1024 * 1024;
const MAX_REQUEST_DURATION_SECONDS: u64 = 10;

struct Http {
    client: reqwest::Client,
    gravatar_url: String,
    ui_avatars_url: String,
}

pub fn new(settings: Arc<Settings>) -> impl AvatarFetcher {
    Http {
        client: reqwest::Client::builder()
            .timeout(Duration::from_secs(MAX_REQUEST_DURATION_SECONDS))
            .build()
            .unwrap(),
        gravatar_url: settings.gravatar_url(),
        ui_avatars_url: settings.ui_avatars_url(),
    }
}

#[async_trait]
impl AvatarFetcher for Http {
    async fn fetch_gravatar(&self, email: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        let hash = hex::encode(Sha256::digest(email.trim().to_lowercase()));
        let url = format!("{}/{}", self.gravatar_url, hash);

        tracing::info!("requesting gravatar from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("d", "404")])
            .send()
            .await
            .map_err(|e| AvatarError::RemoteFetch(format!("could not get {}: {}", url, e)))?;

        self.body_if_found(response).await
    }

    async fn fetch_initials(&self, name: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        tracing::info!("requesting initials avatar from {}", self.ui_avatars_url);

        let response = self
            .client
            .get(&self.ui_avatars_url)
            .query(&[("name", name), ("background", "random"), ("format", "png")])
            .send()
            .await
            .map_err(|e| {
                AvatarError::RemoteFetch(format!("could not get {}: {}", self.ui_avatars_url, e))
            })?;

        self.body_if_found(response).await
    }
}

impl Http {
    // Only 200 counts as a hit; anything else means the service has no image
    // for this identity and the chain moves on.
    async fn body_if_found(&self, response: Response) -> Result<Option<Vec<u8>>, AvatarError> {
        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let body = self
            .read_body_with_limit(response, MAX_BODY_SIZE)
            .await
            .map_err(|e| AvatarError::RemoteFetch(e.to_string()))?;

        Ok(Some(body))
    }

    async fn read_body_with_limit(&self, mut resp: Response, limit: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        while let Some(chunk) = resp.chunk().await? {
            if buf.len() + chunk.len() > limit {
                return Err(anyhow!(
                    "response body too large {}",
                    buf.len() + chunk.len()
                ));
            }
            buf.extend_from_slice(&chunk);
        }

        return Ok(buf);
    }
}
