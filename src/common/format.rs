use crate::common::error::AvatarError;

/// Closed set of image formats accepted for avatars. Adding a format means
/// adding a variant here and extending both tables below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jpeg,
    Png,
}

impl Format {
    pub fn from_content_type(content_type: &str) -> Result<Format, AvatarError> {
        match content_type {
            "image/jpeg" => Ok(Format::Jpeg),
            "image/png" => Ok(Format::Png),
            other => Err(AvatarError::UnsupportedContentType(other.to_string())),
        }
    }

    pub fn from_extension(extension: &str) -> Result<Format, AvatarError> {
        match extension {
            "jpg" => Ok(Format::Jpeg),
            "png" => Ok(Format::Png),
            other => Err(AvatarError::UnsupportedContentType(other.to_string())),
        }
    }

    pub fn content_type(&self) -> String {
        match self {
            Format::Jpeg => String::from("image/jpeg"),
            Format::Png => String::from("image/png"),
        }
    }

    pub fn extension(&self) -> String {
        match self {
            Format::Jpeg => String::from("jpg"),
            Format::Png => String::from("png"),
        }
    }
}
