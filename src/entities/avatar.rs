use serde::Serialize;

/// Folder prefix inside the storage bucket. Short asset names are returned to
/// callers; prefixing with the folder reconstructs the full storage path.
pub const FOLDER: &str = "avatars";

/// Pre-seeded fallback object in the bucket. Never written or deleted here.
pub const DEFAULT_AVATAR: &str = "avatar_default.jpg";

pub fn path_for(name: &str) -> String {
    format!("{}/{}", FOLDER, name)
}

#[derive(Debug, Clone, Serialize)]
pub struct AvatarReference {
    file_name: String,
    url: String,
}

pub fn new(file_name: String, url: String) -> AvatarReference {
    AvatarReference { file_name, url }
}

/// Transient image bytes plus their declared content type. Built either from
/// an inbound upload or from bytes fetched off a remote avatar service.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    content_type: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(content_type: String, bytes: Vec<u8>) -> ImagePayload {
        ImagePayload {
            content_type,
            bytes,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
