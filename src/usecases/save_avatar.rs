use std::sync::Arc;

use crate::{
    common::{error::AvatarError, format::Format},
    entities::{
        avatar::{self, ImagePayload},
        user::UserIdentity,
    },
};

use super::gateways::Storage;

pub struct SaveAvatar {
    storage: Arc<dyn Storage>,
}

pub fn new(storage: Arc<dyn Storage>) -> SaveAvatar {
    SaveAvatar { storage }
}

impl SaveAvatar {
    /// Validates the declared content type, derives the deterministic asset
    /// name and delegates persistence. Errors propagate; when called from the
    /// generation chain the caller converts them to the default reference.
    pub async fn execute(
        &self,
        user: &UserIdentity,
        payload: &ImagePayload,
    ) -> Result<String, AvatarError> {
        let format = Format::from_content_type(payload.content_type())?;

        let name = format!("avatar.{}.{}", user.id, format.extension());
        let path = avatar::path_for(&name);

        tracing::info!("saving avatar {} ({} bytes)", path, payload.len());

        self.storage
            .save(user.id, path, format.content_type(), payload.bytes().to_vec())
            .await
            .map_err(AvatarError::Storage)?;

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::testing::FakeStorage;

    fn user(id: u64) -> UserIdentity {
        crate::entities::user::new(id, String::from("Test User"), String::from("test@example.com"))
    }

    #[tokio::test]
    async fn saves_png_under_deterministic_name() {
        let storage = Arc::new(FakeStorage::default());
        let save = new(storage.clone());

        let payload = ImagePayload::new(String::from("image/png"), vec![1, 2, 3]);
        let name = save.execute(&user(7), &payload).await.unwrap();

        assert_eq!(name, "avatar.7.png");
        let saved = storage.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].path, "avatars/avatar.7.png");
        assert_eq!(saved[0].content_type, "image/png");
        assert_eq!(saved[0].owner_id, 7);
        assert_eq!(saved[0].body, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn saves_jpeg_with_jpg_extension() {
        let storage = Arc::new(FakeStorage::default());
        let save = new(storage.clone());

        let payload = ImagePayload::new(String::from("image/jpeg"), vec![0xff, 0xd8]);
        let name = save.execute(&user(42), &payload).await.unwrap();

        assert_eq!(name, "avatar.42.jpg");
        assert!(name.contains("42"));
    }

    #[tokio::test]
    async fn rejects_unsupported_type_without_touching_storage() {
        let storage = Arc::new(FakeStorage::default());
        let save = new(storage.clone());

        let payload = ImagePayload::new(String::from("image/gif"), vec![1]);
        let err = save.execute(&user(9), &payload).await.unwrap_err();

        assert!(matches!(err, AvatarError::UnsupportedContentType(_)));
        assert!(storage.saved().is_empty());
    }

    #[tokio::test]
    async fn repeated_saves_overwrite_the_same_name() {
        let storage = Arc::new(FakeStorage::default());
        let save = new(storage.clone());

        let payload = ImagePayload::new(String::from("image/png"), vec![1]);
        let first = save.execute(&user(7), &payload).await.unwrap();
        let second = save.execute(&user(7), &payload).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let storage = Arc::new(FakeStorage::failing());
        let save = new(storage);

        let payload = ImagePayload::new(String::from("image/png"), vec![1]);
        let err = save.execute(&user(7), &payload).await.unwrap_err();

        assert!(matches!(err, AvatarError::Storage(_)));
    }
}
