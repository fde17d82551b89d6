use async_trait::async_trait;

use crate::common::error::AvatarError;

/// Blob-storage collaborator. Paths are full storage paths (folder-prefixed);
/// whether the backend is object storage or something else is its business.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(
        &self,
        owner_id: u64,
        path: String,
        content_type: String,
        body: Vec<u8>,
    ) -> Result<String, String>;
    async fn load(&self, path: String) -> Result<Vec<u8>, String>;
    fn url_for(&self, path: &str) -> String;
}

/// Remote avatar sources. `Ok(None)` means the service answered but has no
/// image for this identity; transport failures surface as `RemoteFetch`
/// errors. The chain treats both as "advance to the next source".
#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    async fn fetch_gravatar(&self, email: &str) -> Result<Option<Vec<u8>>, AvatarError>;
    async fn fetch_initials(&self, name: &str) -> Result<Option<Vec<u8>>, AvatarError>;
}
