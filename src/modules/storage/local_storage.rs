//! Filesystem storage for report images
//!
//! Images land in the configured upload directory and are served back by the
//! static file service under the public prefix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;
use crate::shared::validation::EXTENSION_REGEX;

/// Attempts at finding a free name before giving up
const MAX_NAME_ATTEMPTS: i64 = 16;

pub struct LocalStorage {
    upload_dir: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            public_prefix: config.public_prefix.clone(),
        }
    }

    pub async fn ensure_dir_exists(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.upload_dir).await?;
        info!("Upload directory ready: {}", self.upload_dir.display());
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Store an uploaded image for `user_id` and return its public URL
    pub async fn store_image(
        &self,
        user_id: i32,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let now = Utc::now();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = object_name(
                user_id,
                original_filename,
                now + Duration::microseconds(attempt),
            );
            let path = self.upload_dir.join(&name);

            let file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(AppError::Storage(e)),
            };

            write_or_remove(file, &path, data).await?;

            debug!("Stored image '{}' ({} bytes)", name, data.len());
            return Ok(self.public_url(&name));
        }

        Err(AppError::Internal(format!(
            "No free file name for upload of user {}",
            user_id
        )))
    }

    pub fn public_url(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix, name)
    }
}

/// Write `data` and flush. On failure the partly written file at `path` is removed.
async fn write_or_remove<W>(mut writer: W, path: &Path, data: &[u8]) -> Result<(), AppError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(data).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!(
                "Failed to remove partial upload {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(AppError::Storage(e));
    }

    Ok(())
}

/// `{user_id}_{YYYYmmddHHMMSSffffff}{ext}`, where `ext` is the lowercased extension
/// of the original name or empty when it is missing or unusual.
pub fn object_name(user_id: i32, original_filename: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}{}",
        user_id,
        at.format("%Y%m%d%H%M%S%6f"),
        sanitized_extension(original_filename)
    )
}

fn sanitized_extension(filename: &str) -> String {
    // Browsers on Windows may send a full path
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    Path::new(basename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .filter(|ext| EXTENSION_REGEX.is_match(ext))
        .unwrap_or_default()
}

/// Only `image/*` parts are accepted as report attachments
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap() + Duration::microseconds(42)
    }

    fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(&StorageConfig {
            upload_dir: dir.to_path_buf(),
            public_prefix: "/static/uploads".to_string(),
            static_dir: dir.to_path_buf(),
        })
    }

    #[test]
    fn test_object_name_format() {
        assert_eq!(
            object_name(12, "Foto.JPG", fixed_time()),
            "12_20240309140507000042.jpg"
        );
    }

    #[test]
    fn test_object_name_drops_odd_extensions() {
        assert_eq!(
            object_name(1, "evil.php%00", fixed_time()),
            "1_20240309140507000042"
        );
        assert_eq!(object_name(1, "noext", fixed_time()), "1_20240309140507000042");
        assert_eq!(
            object_name(1, "C:\\Users\\x\\img.png", fixed_time()),
            "1_20240309140507000042.png"
        );
    }

    #[test]
    fn test_image_content_type() {
        assert!(is_image_content_type(Some("image/png")));
        assert!(is_image_content_type(Some("Image/JPEG")));
        assert!(!is_image_content_type(Some("application/pdf")));
        assert!(!is_image_content_type(None));
    }

    #[tokio::test]
    async fn test_store_image_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let url = storage.store_image(5, "a.png", b"png-bytes").await.unwrap();
        assert!(url.starts_with("/static/uploads/5_"));
        assert!(url.ends_with(".png"));

        let name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_store_image_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(dir.path());

        let first = storage.store_image(5, "a.png", b"one").await.unwrap();
        let second = storage.store_image(5, "a.png", b"two").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_image_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir.path().join("missing"));

        let result = storage.store_image(5, "a.png", b"x").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("5_20240309140507000042.png");
        std::fs::write(&path, b"").unwrap();

        let result = write_or_remove(FullDisk, &path, b"png-bytes").await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(!path.exists());
    }
}
