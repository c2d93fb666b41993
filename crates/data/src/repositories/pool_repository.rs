//! Pool catalog cache stored as a JSON file.

use crate::error::DataError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tickscope_domain::entities::Pool;
use tracing::debug;

/// Bumped whenever the stored layout changes; older files are ignored.
pub const CATALOG_FORMAT_VERSION: u32 = 1;

/// Snapshot of the complete, unfiltered pool catalog.
///
/// Matching is always re-applied to the stored pools, so a cached file never
/// decides which token pair or fee tier a result belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolCatalogRecord {
    /// Layout version.
    pub version: u32,
    /// Endpoint the catalog was read from.
    pub source: String,
    /// When the catalog was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Every pool, in server order.
    pub pools: Vec<Pool>,
}

/// Repository for the cached pool catalog.
#[derive(Debug, Clone)]
pub struct PoolRepository {
    path: PathBuf,
    source: String,
    ttl: Duration,
}

impl PoolRepository {
    /// Creates a repository for catalogs of `source` stored at `path`,
    /// considered fresh for `ttl`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            ttl,
        }
    }

    /// Returns the cache file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached catalog if it exists, matches this repository's source
    /// and layout version, and is younger than the TTL.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or decoded.
    pub async fn load_fresh(&self, now: DateTime<Utc>) -> Result<Option<PoolCatalogRecord>, DataError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(DataError::CacheIo {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let record: PoolCatalogRecord =
            serde_json::from_slice(&bytes).map_err(|source| DataError::CacheFormat {
                path: self.path.clone(),
                source,
            })?;

        if record.version != CATALOG_FORMAT_VERSION || record.source != self.source {
            debug!(path = %self.path.display(), "pool cache belongs to another source or layout");
            return Ok(None);
        }
        // A timestamp in the future fails the conversion and counts as stale.
        let fresh = now
            .signed_duration_since(record.fetched_at)
            .to_std()
            .is_ok_and(|age| age <= self.ttl);
        if !fresh {
            debug!(path = %self.path.display(), fetched_at = %record.fetched_at, "pool cache is stale");
            return Ok(None);
        }
        Ok(Some(record))
    }

    /// Stores the catalog, replacing any previous file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, pools: &[Pool], fetched_at: DateTime<Utc>) -> Result<(), DataError> {
        let record = PoolCatalogRecord {
            version: CATALOG_FORMAT_VERSION,
            source: self.source.clone(),
            fetched_at,
            pools: pools.to_vec(),
        };
        let bytes = serde_json::to_vec(&record).map_err(|source| DataError::CacheFormat {
            path: self.path.clone(),
            source,
        })?;

        let io_error = |source| DataError::CacheIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        // Write then rename so a crash never leaves a truncated cache behind.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_error)?;
        debug!(path = %self.path.display(), pools = pools.len(), "pool cache written");
        Ok(())
    }
}
