use std::sync::Arc;

use crate::{
    common::error::AvatarError,
    entities::{
        avatar::{ImagePayload, DEFAULT_AVATAR},
        user::UserIdentity,
    },
};

use super::{gateways::AvatarFetcher, save_avatar::SaveAvatar};

pub struct GenerateAvatar {
    fetcher: Arc<dyn AvatarFetcher>,
    save_avatar: Arc<SaveAvatar>,
}

pub fn new(fetcher: Arc<dyn AvatarFetcher>, save_avatar: Arc<SaveAvatar>) -> GenerateAvatar {
    GenerateAvatar {
        fetcher,
        save_avatar,
    }
}

// Source priority:
// - caller-supplied upload
// - gravatar keyed by the email digest
// - ui-avatars initials image
// - the pre-seeded default object
impl GenerateAvatar {
    /// Resolves an avatar for the user, degrading to the default reference on
    /// any failure. Callers (registration flows) can rely on this never
    /// erroring out.
    pub async fn execute(&self, user: &UserIdentity, upload: Option<ImagePayload>) -> String {
        match self.resolve(user, upload).await {
            Ok(name) => name,
            Err(e) => {
                tracing::error!("could not resolve avatar for user {}: {}", user.id, e);
                String::from(DEFAULT_AVATAR)
            }
        }
    }

    async fn resolve(
        &self,
        user: &UserIdentity,
        upload: Option<ImagePayload>,
    ) -> Result<String, AvatarError> {
        if let Some(payload) = upload.filter(|p| !p.is_empty()) {
            return self.save_avatar.execute(user, &payload).await;
        }

        let bytes = self.fetch_remote(user).await?;
        let payload = ImagePayload::new(String::from("image/png"), bytes);
        self.save_avatar.execute(user, &payload).await
    }

    async fn fetch_remote(&self, user: &UserIdentity) -> Result<Vec<u8>, AvatarError> {
        match self.fetcher.fetch_gravatar(&user.email).await {
            Ok(Some(bytes)) => return Ok(bytes),
            Ok(None) => tracing::info!("no gravatar for user {}", user.id),
            Err(e) => tracing::warn!("gravatar lookup failed for user {}: {}", user.id, e),
        }

        match self.fetcher.fetch_initials(&user.name).await {
            Ok(Some(bytes)) => return Ok(bytes),
            Ok(None) => tracing::info!("no initials avatar for user {}", user.id),
            Err(e) => tracing::warn!("initials fetch failed for user {}: {}", user.id, e),
        }

        Err(AvatarError::SourcesExhausted)
    }
}
