use crate::store::IngestError;
use regionscope_common::{WorldSnapshot, WorldStatistics};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

/// zstd level used for compressed documents.
const ZSTD_LEVEL: i32 = 3;

/// On-disk encoding of a statistics document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Cbor,
    CborZstd,
}

impl SnapshotFormat {
    /// Pick the format from a file name. `.cbor.zst` must be checked before `.cbor`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if name.ends_with(".cbor.zst") {
            Ok(Self::CborZstd)
        } else if name.ends_with(".cbor") {
            Ok(Self::Cbor)
        } else if name.ends_with(".json") {
            Ok(Self::Json)
        } else {
            Err(IngestError::UnknownFormat(path.display().to_string()))
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Cbor => "cbor",
            Self::CborZstd => "cbor.zst",
        }
    }
}

/// Decode a statistics document from raw bytes.
pub fn decode_statistics(
    data: &[u8],
    format: SnapshotFormat,
) -> Result<WorldStatistics, IngestError> {
    let stats = match format {
        SnapshotFormat::Json => decode_json(data)?,
        SnapshotFormat::Cbor => cbor_deserialize(data)?,
        SnapshotFormat::CborZstd => cbor_deserialize(&zstd_decompress(data)?)?,
    };
    tracing::debug!(?format, worlds = stats.worlds.len(), "decoded statistics");
    Ok(stats)
}

/// JSON documents are either the statistics object or a bare array of worlds.
/// The first significant byte picks the shape, so field errors keep their cause.
fn decode_json(data: &[u8]) -> Result<WorldStatistics, IngestError> {
    let first = data.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'[') {
        let worlds: Vec<WorldSnapshot> = serde_json::from_slice(data)?;
        Ok(WorldStatistics {
            worlds,
            ..WorldStatistics::default()
        })
    } else {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Encode a statistics document to raw bytes.
pub fn encode_statistics(
    stats: &WorldStatistics,
    format: SnapshotFormat,
) -> Result<Vec<u8>, IngestError> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(stats)?),
        SnapshotFormat::Cbor => cbor_serialize(stats),
        SnapshotFormat::CborZstd => zstd_compress(&cbor_serialize(stats)?),
    }
}

fn cbor_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, IngestError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| IngestError::CborEncode(e.to_string()))?;
    Ok(buf)
}

fn cbor_deserialize<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, IngestError> {
    ciborium::from_reader(data).map_err(|e| IngestError::CborDecode(e.to_string()))
}

fn zstd_compress(data: &[u8]) -> Result<Vec<u8>, IngestError> {
    let mut encoder = zstd::Encoder::new(Vec::new(), ZSTD_LEVEL)?;
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn zstd_decompress(data: &[u8]) -> Result<Vec<u8>, IngestError> {
    let mut decoder = zstd::Decoder::new(data)?;
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}
