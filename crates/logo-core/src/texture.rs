//! User-supplied surface textures

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    #[error("{name} is not an image (type: {mime})")]
    NotAnImage { name: String, mime: String },

    #[error("{0} is empty")]
    Empty(String),
}

/// An image file read fully into memory, ready to be decoded by the renderer
#[derive(Clone, PartialEq)]
pub struct EmbeddedTexture {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl fmt::Debug for EmbeddedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedTexture")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl EmbeddedTexture {
    /// Accept a file as texture if its MIME type is an image type
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return Err(TextureError::NotAnImage { name, mime });
        }
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TextureError::Empty(name));
        }
        Ok(Self { name, mime, bytes })
    }

    /// Accept a file whose MIME type has to be guessed from its extension
    pub fn from_file_name(
        name: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        let mime = mime_from_extension(Path::new(&name)).unwrap_or("application/octet-stream");
        Self::new(name, mime, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// MIME type for common image file extensions
pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_images() {
        let result = EmbeddedTexture::new("notes.txt", "text/plain", vec![1u8]);
        assert!(matches!(result, Err(TextureError::NotAnImage { .. })));
    }

    #[test]
    fn test_rejects_empty_files() {
        let result = EmbeddedTexture::new("blank.png", "image/png", Vec::<u8>::new());
        assert_eq!(result, Err(TextureError::Empty("blank.png".to_string())));
    }

    #[test]
    fn test_guesses_mime_from_extension() {
        let texture = EmbeddedTexture::from_file_name("Marble.JPG", vec![0xffu8, 0xd8]).unwrap();
        assert_eq!(texture.mime(), "image/jpeg");
        assert!(EmbeddedTexture::from_file_name("model.stl", vec![1u8]).is_err());
    }
}
