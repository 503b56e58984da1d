//! Loading of the introspection document from disk.
//!
//! The schema may ship gzip-compressed. When only `<path>.gz` exists it is decompressed
//! once, written next to it as `<path>`, and the plain file is used from then on.

use std::io::{self, Read as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::GzDecoder;
use schema_search::SchemaDocument;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::{debug, info};

/// An error while loading the schema document
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    #[error("Unable to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Unable to decompress {}: {source}", path.display())]
    Decompress { path: PathBuf, source: io::Error },

    #[error("Unable to save decompressed schema to {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },

    #[error("Invalid schema JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Schema decompression task failed: {0}")]
    Task(#[from] JoinError),
}

/// Where the introspection document lives
#[derive(Debug, Clone)]
pub struct SchemaSource {
    path: PathBuf,
    decompress_lock: Arc<Mutex<()>>,
}

impl SchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            decompress_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The gzip sibling of the schema file, `<path>.gz`
    pub fn compressed_path(&self) -> PathBuf {
        self.sibling(".gz")
    }

    /// Where the decompressed schema is written before being renamed into place
    fn partial_path(&self) -> PathBuf {
        self.sibling(".partial")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    /// Read and parse the schema document.
    pub async fn load(&self) -> Result<SchemaDocument, SchemaLoadError> {
        let content = self.read().await?;
        serde_json::from_slice(&content).map_err(|source| SchemaLoadError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn read(&self) -> Result<Vec<u8>, SchemaLoadError> {
        if !exists(&self.path).await {
            let _guard = self.decompress_lock.lock().await;
            let compressed = self.compressed_path();
            // Another call may have finished decompressing while we waited
            if !exists(&self.path).await && exists(&compressed).await {
                return self.decompress(compressed).await;
            }
        }

        info!("Reading GraphQL schema from {}", self.path.display());
        fs::read(&self.path)
            .await
            .map_err(|source| SchemaLoadError::Read {
                path: self.path.clone(),
                source,
            })
    }

    async fn decompress(&self, compressed: PathBuf) -> Result<Vec<u8>, SchemaLoadError> {
        info!("Decompressing GraphQL schema from {}", compressed.display());
        let data = fs::read(&compressed)
            .await
            .map_err(|source| SchemaLoadError::Read {
                path: compressed.clone(),
                source,
            })?;

        let content = tokio::task::spawn_blocking(move || gunzip(&data))
            .await?
            .map_err(|source| SchemaLoadError::Decompress {
                path: compressed,
                source,
            })?;
        debug!("Decompressed schema is {} bytes", content.len());

        // Readers check for the plain file without the lock, so it must appear whole
        let partial = self.partial_path();
        let persisted = match fs::write(&partial, &content).await {
            Ok(()) => fs::rename(&partial, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(source) = persisted {
            let _ = fs::remove_file(&partial).await;
            return Err(SchemaLoadError::Persist {
                path: self.path.clone(),
                source,
            });
        }
        info!("Saved uncompressed schema to {}", self.path.display());

        Ok(content)
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

fn gunzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}
