//! Turning user-supplied files into image attachments.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::models::ImageAttachment;

/// Media type used when a file's type cannot be determined
const UNKNOWN_MEDIA_TYPE: &str = "application/octet-stream";

/// Where a file's bytes come from
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Read from disk
    Path(PathBuf),
    /// Already in memory (drag-and-drop, paste, tests)
    Bytes(Vec<u8>),
}

/// A file offered for upload
#[derive(Debug, Clone)]
pub struct FileInput {
    /// File name shown to the user
    pub name: String,
    /// Declared media type
    pub media_type: String,
    /// Payload source
    pub source: FileSource,
}

impl FileInput {
    /// A file on disk; the media type is derived from its extension
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            name,
            media_type: guess_media_type(&path),
            source: FileSource::Path(path),
        }
    }

    /// An in-memory file with a declared media type
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Whether the declared media type is an image
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Why an input did not become an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Declared media type is not `image/*`
    NotAnImage(String),
    /// Reading the payload failed
    ReadFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnImage(media_type) => write!(f, "not an image ({media_type})"),
            Self::ReadFailed(err) => write!(f, "could not read file: {err}"),
        }
    }
}

/// An input that was not attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// File name
    pub name: String,
    /// Reason it was skipped
    pub reason: SkipReason,
}

/// Outcome of an ingestion batch
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// New attachments, in input order
    pub added: Vec<ImageAttachment>,
    /// Inputs that were dropped
    pub skipped: Vec<SkippedFile>,
}

/// Guess an image media type from a path's extension
pub fn guess_media_type(path: &Path) -> String {
    image::ImageFormat::from_path(path)
        .map_or_else(|_| UNKNOWN_MEDIA_TYPE.to_string(), |f| f.to_mime_type().to_string())
}

/// Encode bytes as a `data:` URI
pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", STANDARD.encode(bytes))
}

/// Decode every image input concurrently.
///
/// Non-image inputs are skipped up front. Reads run as independent tasks, but
/// results are collected in input order so the attachment list does not
/// depend on which read finishes first.
pub async fn ingest(files: Vec<FileInput>) -> IngestReport {
    let mut report = IngestReport::default();
    let mut pending = Vec::with_capacity(files.len());

    for file in files {
        if !file.is_image() {
            tracing::debug!("Skipping non-image {} ({})", file.name, file.media_type);
            report.skipped.push(SkippedFile {
                name: file.name,
                reason: SkipReason::NotAnImage(file.media_type),
            });
            continue;
        }

        let media_type = file.media_type.clone();
        let handle = tokio::spawn(async move {
            let bytes = read_payload(file.source).await?;
            Ok::<_, std::io::Error>(encode_data_url(&media_type, &bytes))
        });
        pending.push((file.name, file.media_type, handle));
    }

    for (name, media_type, handle) in pending {
        let outcome = match handle.await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(data_url) => {
                report
                    .added
                    .push(ImageAttachment::new(name, media_type, data_url));
            }
            Err(error) => {
                tracing::warn!("Failed to read image {name}: {error}");
                report.skipped.push(SkippedFile {
                    name,
                    reason: SkipReason::ReadFailed(error),
                });
            }
        }
    }

    report
}

async fn read_payload(source: FileSource) -> std::io::Result<Vec<u8>> {
    match source {
        FileSource::Path(path) => tokio::fs::read(&path).await,
        FileSource::Bytes(bytes) => Ok(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_guess_media_type() {
        assert_eq!(guess_media_type(Path::new("cat.PNG")), "image/png");
        assert_eq!(guess_media_type(Path::new("a/b/photo.jpeg")), "image/jpeg");
        assert_eq!(guess_media_type(Path::new("notes.txt")), UNKNOWN_MEDIA_TYPE);
    }

    #[test]
    fn test_encode_data_url() {
        assert_eq!(encode_data_url("image/gif", b"GIF89a"), "data:image/gif;base64,R0lGODlh");
    }

    #[tokio::test]
    async fn test_ingest_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let report = ingest(vec![FileInput::from_path(&path)]).await;
        assert!(report.skipped.is_empty());
        assert_eq!(report.added[0].name, "pixel.png");
        assert_eq!(report.added[0].media_type, "image/png");
        assert_eq!(report.added[0].data_url, "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_missing_file_is_skipped() {
        let dir = tempdir().unwrap();
        let report = ingest(vec![
            FileInput::from_path(dir.path().join("gone.jpg")),
            FileInput::from_bytes("ok.webp", "image/webp", vec![0]),
        ])
        .await;

        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].name, "ok.webp");
        assert_eq!(report.skipped[0].name, "gone.jpg");
        assert!(matches!(report.skipped[0].reason, SkipReason::ReadFailed(_)));
    }

    #[tokio::test]
    async fn test_ids_unique_within_batch() {
        let files = (0..20)
            .map(|i| FileInput::from_bytes(format!("{i}.png"), "image/png", vec![i]))
            .collect();
        let report = ingest(files).await;
        let mut ids: Vec<_> = report.added.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        let names: Vec<_> = report.added.iter().map(|a| a.name.clone()).collect();
        let expected: Vec<_> = (0..20).map(|i| format!("{i}.png")).collect();
        assert_eq!(names, expected);
    }
}
