use std::sync::Arc;

use crate::{common::error::AvatarError, entities::avatar};

use super::gateways::Storage;

pub struct GetAvatar {
    storage: Arc<dyn Storage>,
}

pub fn new(storage: Arc<dyn Storage>) -> GetAvatar {
    GetAvatar { storage }
}

impl GetAvatar {
    pub async fn execute(&self, name: String) -> Result<Vec<u8>, AvatarError> {
        self.storage
            .load(avatar::path_for(&name))
            .await
            .map_err(AvatarError::Storage)
    }

    /// Absolute URL for a short asset name. Pure composition, no I/O.
    pub fn url_for(&self, name: &str) -> String {
        self.storage.url_for(&avatar::path_for(name))
    }
}
