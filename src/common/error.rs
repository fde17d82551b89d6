use thiserror::Error;

/// Errors produced by the avatar pipeline. The direct-upload path surfaces
/// these to the caller; the automatic generation chain maps every variant to
/// the default avatar reference instead.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("unsupported content type {0}, expected image/jpeg or image/png")]
    UnsupportedContentType(String),

    #[error("could not fetch remote avatar: {0}")]
    RemoteFetch(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("no avatar source produced image bytes")]
    SourcesExhausted,
}
