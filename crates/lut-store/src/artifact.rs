//! The on-disk artifact layout.
//!
//! ```text
//! bytes 0..4    magic "RLUT"
//! bytes 4..8    u32 LE header length
//! bytes 8..8+n  JSON header (version, run metadata, labels, coords, shape)
//! rest          dense row-major values, little-endian f32 or f64
//! ```

use std::path::Path;

use bytes::{BufMut, BytesMut};
use chrono::{DateTime, Utc};
use lut_common::{CoordValues, LookupTable};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

const MAGIC: &[u8; 4] = b"RLUT";
const VERSION: u32 = 1;

/// Storage precision for the value payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 4-byte floats, half the size, ~7 significant digits.
    #[default]
    F32,
    /// 8-byte floats, exact round trip.
    F64,
}

impl Precision {
    fn value_size(self) -> usize {
        match self {
            Precision::F32 => 4,
            Precision::F64 => 8,
        }
    }
}

/// Artifact metadata carried in the JSON header alongside the table axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    pub version: u32,
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub precision: Precision,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    version: u32,
    run_id: Uuid,
    created_at: DateTime<Utc>,
    precision: Precision,
    labels: Vec<String>,
    coords: Vec<CoordValues>,
    shape: Vec<usize>,
}

/// Write a lookup table to `path`, replacing any existing file.
pub async fn write_table(
    path: &Path,
    table: &LookupTable,
    precision: Precision,
    run_id: Uuid,
) -> StoreResult<()> {
    let header = Header {
        version: VERSION,
        run_id,
        created_at: Utc::now(),
        precision,
        labels: table.labels().to_vec(),
        coords: table.coords().to_vec(),
        shape: table.shape().to_vec(),
    };
    let header_json = serde_json::to_vec(&header)?;

    let mut buf = BytesMut::with_capacity(
        8 + header_json.len() + table.len() * precision.value_size(),
    );
    buf.put_slice(MAGIC);
    buf.put_u32_le(header_json.len() as u32);
    buf.put_slice(&header_json);

    match precision {
        Precision::F32 => {
            for &v in table.values() {
                buf.put_f32_le(v as f32);
            }
        }
        Precision::F64 => {
            for &v in table.values() {
                buf.put_f64_le(v);
            }
        }
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &buf).await?;

    info!(
        path = %path.display(),
        bytes = buf.len(),
        shape = ?table.shape(),
        precision = ?precision,
        "Wrote lookup table artifact"
    );
    Ok(())
}

/// Read a lookup table back from `path`.
pub async fn read_table(path: &Path) -> StoreResult<(LookupTable, ArtifactMeta)> {
    let data = tokio::fs::read(path).await?;

    if data.len() < 8 || &data[0..4] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    let header_len = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
    if data.len() < 8 + header_len {
        return Err(StoreError::Truncated {
            expected: header_len,
            found: data.len().saturating_sub(8),
        });
    }

    let header: Header = serde_json::from_slice(&data[8..8 + header_len])?;
    if header.version != VERSION {
        return Err(StoreError::UnsupportedVersion(header.version));
    }

    let expected_values: usize = header.shape.iter().product();
    let payload = &data[8 + header_len..];
    let expected_bytes = expected_values * header.precision.value_size();
    if payload.len() != expected_bytes {
        return Err(StoreError::Truncated {
            expected: expected_bytes,
            found: payload.len(),
        });
    }

    let values: Vec<f64> = match header.precision {
        Precision::F32 => payload
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        Precision::F64 => payload
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
    };

    let table = LookupTable::new(header.labels, header.coords, values)?;
    let meta = ArtifactMeta {
        version: header.version,
        run_id: header.run_id,
        created_at: header.created_at,
        precision: header.precision,
    };
    Ok((table, meta))
}
