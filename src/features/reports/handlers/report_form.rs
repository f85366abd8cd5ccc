//! Multipart body of the browser report forms

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{debug, warn};

use crate::core::error::{AppError, Result};
use crate::modules::storage::{is_image_content_type, LocalStorage};
use crate::shared::constants::MAX_REPORT_IMAGES;

const IMAGES_FIELD: &str = "images";

/// A file part of the `images[]` field
#[derive(Debug)]
pub struct UploadedImage {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Default)]
pub struct ReportForm {
    fields: HashMap<String, Vec<String>>,
    images: Vec<UploadedImage>,
}

impl ReportForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = ReportForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let name = field_key(field.name().unwrap_or("")).to_string();

            if name == IMAGES_FIELD {
                if form.images.len() >= MAX_REPORT_IMAGES {
                    debug!("Ignoring image part beyond the first {}", MAX_REPORT_IMAGES);
                    continue;
                }

                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                form.images.push(UploadedImage {
                    filename,
                    content_type,
                    data,
                });
            } else {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;
                form.push_text(name, text);
            }
        }

        Ok(form)
    }

    fn push_text(&mut self, name: String, value: String) {
        self.fields.entry(name).or_default().push(value);
    }

    /// First value of a single-valued field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a repeated field such as `risk_type[]`
    pub fn list(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_images(self) -> Vec<UploadedImage> {
        self.images
    }
}

/// `risk_type[]` and `risk_type` name the same field
fn field_key(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Store the acceptable images and return their public URLs.
///
/// Parts without a file name or with a non-image type are skipped. A failed
/// write is logged and skipped, it never fails the report.
pub async fn store_images(
    storage: &LocalStorage,
    user_id: i32,
    images: Vec<UploadedImage>,
) -> Vec<String> {
    let mut urls = Vec::with_capacity(images.len());

    for image in images {
        let Some(filename) = image.filename.filter(|f| !f.trim().is_empty()) else {
            debug!("Skipping image part without a file name");
            continue;
        };

        if !is_image_content_type(image.content_type.as_deref()) {
            debug!(
                "Skipping '{}' with content type {:?}",
                filename, image.content_type
            );
            continue;
        }

        match storage.store_image(user_id, &filename, &image.data).await {
            Ok(url) => urls.push(url),
            Err(e) => warn!("Failed to store image '{}' for user {}: {}", filename, user_id, e),
        }
    }

    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StorageConfig;

    fn image(filename: Option<&str>, content_type: Option<&str>) -> UploadedImage {
        UploadedImage {
            filename: filename.map(str::to_string),
            content_type: content_type.map(str::to_string),
            data: Bytes::from_static(b"img"),
        }
    }

    #[test]
    fn test_field_key_strips_brackets() {
        assert_eq!(field_key("risk_type[]"), "risk_type");
        assert_eq!(field_key("department"), "department");
    }

    #[test]
    fn test_repeated_fields_collect_in_order() {
        let mut form = ReportForm::default();
        form.push_text("risk_type".into(), "Kaygan Zemin".into());
        form.push_text("risk_type".into(), "Gaz Sızıntısı".into());
        form.push_text("department".into(), "Depo".into());

        assert_eq!(form.list("risk_type"), ["Kaygan Zemin", "Gaz Sızıntısı"]);
        assert_eq!(form.text("department"), Some("Depo"));
        assert!(form.list("event_type").is_empty());
        assert_eq!(form.text("details"), None);
    }

    #[tokio::test]
    async fn test_store_images_skips_unusable_parts() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(&StorageConfig {
            upload_dir: dir.path().to_path_buf(),
            public_prefix: "/static/uploads".to_string(),
            static_dir: dir.path().to_path_buf(),
        });

        let urls = store_images(
            &storage,
            3,
            vec![
                image(Some("a.png"), Some("image/png")),
                image(None, Some("image/png")),
                image(Some("notes.txt"), Some("text/plain")),
                image(Some("b.jpg"), Some("image/jpeg")),
            ],
        )
        .await;

        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|u| u.starts_with("/static/uploads/3_")));
    }

    #[tokio::test]
    async fn test_store_images_survives_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(&StorageConfig {
            upload_dir: dir.path().join("missing"),
            public_prefix: "/static/uploads".to_string(),
            static_dir: dir.path().to_path_buf(),
        });

        let urls = store_images(&storage, 3, vec![image(Some("a.png"), Some("image/png"))]).await;
        assert!(urls.is_empty());
    }
}
