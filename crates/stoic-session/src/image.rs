use std::path::Path;
use stoic_types::DataUri;

use crate::error::{Result, SessionError};

/// MIME type of an image file, judged by extension
pub fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file into a `data:<mime>;base64,...` string
pub async fn load_image(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mime = image_mime_type(path)
        .ok_or_else(|| SessionError::UnsupportedImage(path.display().to_string()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SessionError::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Loaded image attachment");

    Ok(DataUri::encode(mime, &bytes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_by_extension() {
        assert_eq!(image_mime_type(Path::new("a/b/photo.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime_type(Path::new("x.webp")), Some("image/webp"));
        assert_eq!(image_mime_type(Path::new("notes.txt")), None);
        assert_eq!(image_mime_type(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn test_load_image_encodes_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, [0u8, 0, 0]).unwrap();

        let uri = load_image(&path).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = load_image("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, SessionError::ImageRead { .. }));
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let err = load_image("README.md").await.unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedImage(_)));
    }
}
