//! Image sources: where preloaded bytes come from and how they are measured.

use std::future::Future;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use tracing::trace;

use super::metadata::ImageDimensions;

/// Errors from loading or measuring an image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported image url '{0}'")]
    UnsupportedUrl(String),
    #[error("image '{0}' has zero size")]
    EmptyImage(String),
    #[error("loading '{url}' did not settle within {after:?}")]
    TimedOut { url: String, after: Duration },
}

/// Boxed future returned by [`ImageSource::load`].
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<ImageDimensions, LoadError>> + Send>>;

/// Something that can fetch an image by URL and report its natural size.
///
/// Loads are spawned as tokio tasks, so the returned future must be `Send`
/// and must not borrow from `self`.
pub trait ImageSource: Send + Sync {
    fn load(&self, url: &str) -> LoadFuture;
}

/// Read the natural size from encoded image bytes (PNG, JPEG, GIF).
///
/// Only the header is decoded.
pub fn measure(bytes: &[u8]) -> Result<ImageDimensions, LoadError> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(ImageDimensions::new(width, height))
}

/// Loads images from the local filesystem.
///
/// Accepts `file://` URLs, absolute paths, and paths relative to `base`.
/// Network schemes are rejected.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    base: PathBuf,
}

impl FileImageSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Map a URL onto a filesystem path.
    pub fn resolve(&self, url: &str) -> Result<PathBuf, LoadError> {
        let path = match url.strip_prefix("file://") {
            Some(rest) => rest,
            None if url.contains("://") => return Err(LoadError::UnsupportedUrl(url.to_string())),
            None => url,
        };
        if path.is_empty() {
            return Err(LoadError::UnsupportedUrl(url.to_string()));
        }
        let path = Path::new(path);
        Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        })
    }
}

impl ImageSource for FileImageSource {
    fn load(&self, url: &str) -> LoadFuture {
        let resolved = self.resolve(url);
        let url = url.to_string();
        Box::pin(async move {
            let path = resolved?;
            trace!(path = %path.display(), "reading image");
            let bytes = tokio::fs::read(&path).await?;
            let dims = measure(&bytes)?;
            if dims.width == 0 || dims.height == 0 {
                return Err(LoadError::EmptyImage(url));
            }
            Ok(dims)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn measure_png() {
        assert_eq!(measure(&png_bytes(16, 9)).unwrap(), ImageDimensions::new(16, 9));
    }

    #[test]
    fn measure_garbage_fails() {
        assert!(measure(b"definitely not an image").is_err());
    }

    #[test]
    fn resolve_paths() {
        let source = FileImageSource::new("/srv/media");
        assert_eq!(
            source.resolve("photos/a.png").unwrap(),
            PathBuf::from("/srv/media/photos/a.png")
        );
        assert_eq!(
            source.resolve("file:///tmp/b.png").unwrap(),
            PathBuf::from("/tmp/b.png")
        );
        assert!(matches!(
            source.resolve("https://example.com/c.png"),
            Err(LoadError::UnsupportedUrl(_))
        ));
        assert!(source.resolve("").is_err());
    }

    #[tokio::test]
    async fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wide.png"), png_bytes(40, 30)).unwrap();
        let source = FileImageSource::new(dir.path());
        let dims = source.load("wide.png").await.unwrap();
        assert_eq!(dims, ImageDimensions::new(40, 30));
    }

    #[tokio::test]
    async fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileImageSource::new(dir.path());
        assert!(matches!(
            source.load("missing.png").await,
            Err(LoadError::Io(_))
        ));
    }
}
