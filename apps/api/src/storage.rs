//! Where rendered PDFs end up: a local directory or an S3 bucket.

use std::path::PathBuf;

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::config::S3Config;
use crate::models::DocumentType;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("S3 upload failed: {0}")]
    S3(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredDocument {
    pub filename: String,
    /// Filesystem path or `s3://` URI.
    pub location: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, filename: &str, bytes: Bytes) -> Result<StoredDocument, StorageError>;

    /// Human-readable target, for startup logs.
    fn describe(&self) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// Filenames
// ────────────────────────────────────────────────────────────────────────────

/// `<prefix>_<surname>_<name>_<timestamp-millis>.pdf`, ASCII only.
pub fn document_filename(
    document_type: DocumentType,
    last_name: &str,
    first_name: &str,
    timestamp_millis: i64,
) -> String {
    format!(
        "{}_{}_{}_{}.pdf",
        document_type.filename_prefix(),
        sanitize_component(last_name),
        sanitize_component(first_name),
        timestamp_millis
    )
}

/// Folds diacritics (NFD minus combining marks, `ł` → `l`) and replaces anything
/// that is not an ASCII alphanumeric or `-` with `-`.
fn sanitize_component(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'ł' => 'l',
            'Ł' => 'L',
            c if c.is_ascii_alphanumeric() || c == '-' => c,
            _ => '-',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Local directory
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentStore for LocalDirStore {
    async fn put(&self, filename: &str, bytes: Bytes) -> Result<StoredDocument, StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Io {
                path: self.root.clone(),
                source,
            })?;

        let path = self.root.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(StoredDocument {
            filename: filename.to_string(),
            location: path.display().to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("local directory {}", self.root.display())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    const KEY_PREFIX: &'static str = "documents";

    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn connect(config: &S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "docgen-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl DocumentStore for S3Store {
    async fn put(&self, filename: &str, bytes: Bytes) -> Result<StoredDocument, StorageError> {
        let key = format!("{}/{}", Self::KEY_PREFIX, filename);
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        info!("Uploaded s3://{}/{} ({size} bytes)", self.bucket, key);
        Ok(StoredDocument {
            filename: filename.to_string(),
            location: format!("s3://{}/{}", self.bucket, key),
        })
    }

    fn describe(&self) -> String {
        format!("s3://{}/{}", self.bucket, Self::KEY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_folds_polish_diacritics() {
        assert_eq!(
            document_filename(DocumentType::Certificate, "Łukaszewska", "Żaneta", 1_700_000_000_000),
            "certyfikat_Lukaszewska_Zaneta_1700000000000.pdf"
        );
        assert_eq!(
            document_filename(DocumentType::Internship, "Gwóźdź-Bał", "Michał", 1),
            "staz_Gwozdz-Bal_Michal_1.pdf"
        );
    }

    #[test]
    fn test_filename_replaces_unsafe_characters() {
        assert_eq!(
            document_filename(DocumentType::References, "O'Brien / Smith", "Jan", 42),
            "referencje_O-Brien---Smith_Jan_42.pdf"
        );
    }

    #[tokio::test]
    async fn test_local_store_creates_directory_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("output");
        let store = LocalDirStore::new(&root);

        let stored = store
            .put("referencje_Nowak_Jan_1.pdf", Bytes::from_static(b"%PDF-1.5"))
            .await
            .unwrap();

        assert_eq!(stored.filename, "referencje_Nowak_Jan_1.pdf");
        let written = std::fs::read(root.join("referencje_Nowak_Jan_1.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.5");
        assert!(stored.location.ends_with("referencje_Nowak_Jan_1.pdf"));
    }

    #[tokio::test]
    async fn test_local_store_reports_io_failure() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot be used as the output directory.
        let store = LocalDirStore::new(file.path());
        let err = store
            .put("x.pdf", Bytes::from_static(b"%PDF"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
