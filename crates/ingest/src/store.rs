use crate::format::{SnapshotFormat, decode_statistics, encode_statistics};
use regionscope_common::WorldStatistics;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Errors from reading or writing statistics documents.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CBOR serialization error: {0}")]
    CborEncode(String),
    #[error("CBOR deserialization error: {0}")]
    CborDecode(String),
    #[error("unknown statistics format for {0} (expected .json, .cbor or .cbor.zst)")]
    UnknownFormat(String),
}

/// A decoded document together with the SHA-256 of the bytes it came from.
#[derive(Debug, Clone)]
pub struct LoadedStatistics {
    pub statistics: WorldStatistics,
    pub format: SnapshotFormat,
    pub digest: String,
}

/// Read and decode a statistics document, choosing the format by extension.
pub fn load_statistics(path: impl AsRef<Path>) -> Result<LoadedStatistics, IngestError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let data = std::fs::read(path)?;
    let digest = sha256_hex(&data);
    let statistics = decode_statistics(&data, format)?;
    tracing::info!(
        path = %path.display(),
        worlds = statistics.worlds.len(),
        bytes = data.len(),
        "loaded statistics"
    );
    Ok(LoadedStatistics {
        statistics,
        format,
        digest,
    })
}

/// Encode and write a statistics document, choosing the format by extension.
/// Returns the digest of the written bytes.
pub fn save_statistics(
    path: impl AsRef<Path>,
    stats: &WorldStatistics,
) -> Result<String, IngestError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let data = encode_statistics(stats, format)?;
    std::fs::write(path, &data)?;
    tracing::info!(path = %path.display(), bytes = data.len(), "saved statistics");
    Ok(sha256_hex(&data))
}

/// A statistics file that is re-read on demand.
///
/// Remembers the digest of the last document it handed out, so a refresh of
/// an unchanged file costs one read and no decode.
#[derive(Debug)]
pub struct SnapshotSource {
    path: PathBuf,
    last_digest: Option<String>,
}

impl SnapshotSource {
    /// Track the file at `path`. Fails early if the extension is unsupported.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref().to_path_buf();
        SnapshotFormat::from_path(&path)?;
        Ok(Self {
            path,
            last_digest: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Digest of the last document returned, if any.
    pub fn last_digest(&self) -> Option<&str> {
        self.last_digest.as_deref()
    }

    /// Load the document unconditionally.
    pub fn load(&mut self) -> Result<LoadedStatistics, IngestError> {
        let loaded = load_statistics(&self.path)?;
        self.last_digest = Some(loaded.digest.clone());
        Ok(loaded)
    }

    /// Load the document only if its bytes changed since the last load.
    pub fn reload_if_changed(&mut self) -> Result<Option<LoadedStatistics>, IngestError> {
        let data = std::fs::read(&self.path)?;
        let digest = sha256_hex(&data);
        if self.last_digest.as_deref() == Some(digest.as_str()) {
            tracing::debug!(path = %self.path.display(), "statistics unchanged");
            return Ok(None);
        }

        let format = SnapshotFormat::from_path(&self.path)?;
        let statistics = decode_statistics(&data, format)?;
        self.last_digest = Some(digest.clone());
        tracing::info!(
            path = %self.path.display(),
            worlds = statistics.worlds.len(),
            "statistics changed"
        );
        Ok(Some(LoadedStatistics {
            statistics,
            format,
            digest,
        }))
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
