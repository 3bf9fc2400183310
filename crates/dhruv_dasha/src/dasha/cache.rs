//! Content-addressed store of generated trees.
//!
//! A tree is a pure function of the snapshot, the system, the generation
//! options and (for Kaal Chakra) the path-table version, so the SHA-256 of
//! those inputs identifies it for good. Entries are inserted once and never
//! invalidated; two threads racing on the same key produce equal trees and the
//! first insert wins.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::DashaError;
use crate::snapshot::{NatalSnapshot, PlanetaryPosition};

use super::options::DashaOptions;
use super::subperiod::RashiSubPeriodMethod;
use super::types::{DashaSystem, DashaTree};

/// SHA-256 over every input that shapes a tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Hash the generation inputs.
    ///
    /// `path_table_version` only matters for Kaal Chakra; pass the version in
    /// use so a table swap never serves a stale tree.
    pub fn new(
        snapshot: &NatalSnapshot,
        system: DashaSystem,
        options: &DashaOptions,
        path_table_version: &str,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"dhruv-dasha-tree:v1");
        hasher.update(snapshot.birth_jd().to_bits().to_le_bytes());
        hasher.update(snapshot.utc_offset().local_minus_utc().to_le_bytes());
        hash_position(&mut hasher, &snapshot.ascendant());
        for pos in snapshot.positions() {
            hash_position(&mut hasher, pos);
        }

        hasher.update(system.id().as_bytes());
        hasher.update([options.depth]);
        match options.horizon_years {
            Some(h) => {
                hasher.update([1u8]);
                hasher.update(h.to_bits().to_le_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update(options.year_length_days.to_bits().to_le_bytes());
        hasher.update([match options.chara_sub_periods {
            RashiSubPeriodMethod::Equal => 0u8,
            RashiSubPeriodMethod::Proportional => 1,
        }]);
        hasher.update([u8::from(options.strict_dual_lordship)]);
        hasher.update((path_table_version.len() as u64).to_le_bytes());
        hasher.update(path_table_version.as_bytes());

        Self(hasher.finalize().into())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", &self.to_hex()[..16])
    }
}

fn hash_position(hasher: &mut Sha256, pos: &PlanetaryPosition) {
    hasher.update([pos.rashi().index()]);
    hasher.update(pos.degree_in_rashi().to_bits().to_le_bytes());
}

/// Shared, insert-once tree cache. Hand it to engines as an `Arc`.
#[derive(Debug, Default)]
pub struct DashaCache {
    trees: DashMap<CacheKey, Arc<DashaTree>>,
}

impl DashaCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tree for `key`, if present.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<DashaTree>> {
        self.trees.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Return the cached tree, generating and storing it on a miss.
    ///
    /// Generation runs without holding any map lock. Errors are returned and
    /// nothing is stored.
    pub fn get_or_try_insert_with<F>(
        &self,
        key: CacheKey,
        generate: F,
    ) -> Result<Arc<DashaTree>, DashaError>
    where
        F: FnOnce() -> Result<DashaTree, DashaError>,
    {
        if let Some(tree) = self.get(&key) {
            debug!(key = ?key, "dasha cache hit");
            return Ok(tree);
        }
        debug!(key = ?key, "dasha cache miss");
        let tree = Arc::new(generate()?);
        let stored = self.trees.entry(key).or_insert(tree);
        Ok(Arc::clone(stored.value()))
    }

    /// Number of cached trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.trees.clear();
    }
}
