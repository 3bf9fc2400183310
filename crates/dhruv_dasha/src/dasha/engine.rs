//! Entry points that pick a system, generate its tree and answer queries.
//!
//! [`dasha_tree`] is the stateless dispatcher. [`DashaEngine`] binds a set of
//! options, a Kaal Chakra path table and an optional shared cache, and adds
//! point-in-time queries on top.

use std::sync::Arc;

use tracing::instrument;

use crate::config::DashaConfig;
use crate::error::DashaError;
use crate::snapshot::NatalSnapshot;

use super::cache::{CacheKey, DashaCache};
use super::chara::chara_tree;
use super::kaal_chakra::kaal_chakra_tree_with;
use super::kaal_chakra_data::NakshatraPathTable;
use super::options::DashaOptions;
use super::proportional::{ashtottari_tree, vimshottari_tree, yogini_tree};
use super::query::locate_chain;
use super::types::{DashaSnapshot, DashaSystem, DashaTree};

/// Generate the tree for `system`, using the built-in Kaal Chakra table.
pub fn dasha_tree(
    snapshot: &NatalSnapshot,
    system: DashaSystem,
    options: &DashaOptions,
) -> Result<DashaTree, DashaError> {
    match system {
        DashaSystem::Vimshottari => vimshottari_tree(snapshot, options),
        DashaSystem::Ashtottari => ashtottari_tree(snapshot, options),
        DashaSystem::Yogini => yogini_tree(snapshot, options),
        DashaSystem::Chara => chara_tree(snapshot, options),
        DashaSystem::KaalChakra => {
            kaal_chakra_tree_with(snapshot, &NakshatraPathTable::builtin(), options)
        }
    }
}

/// Configured generator with an optional shared cache.
#[derive(Debug, Clone)]
pub struct DashaEngine {
    options: DashaOptions,
    path_table: Arc<NakshatraPathTable>,
    cache: Option<Arc<DashaCache>>,
}

impl DashaEngine {
    /// Engine with `options`, the built-in path table and no cache.
    pub fn new(options: DashaOptions) -> Result<Self, DashaError> {
        options.validate()?;
        Ok(Self {
            options,
            path_table: Arc::new(NakshatraPathTable::builtin()),
            cache: None,
        })
    }

    /// Engine for a configuration. An external path table, if configured,
    /// must be supplied with [`Self::with_path_table`].
    pub fn from_config(config: &DashaConfig) -> Result<Self, DashaError> {
        config.validate()?;
        Self::new(config.options())
    }

    /// Replace the Kaal Chakra path table.
    pub fn with_path_table(mut self, table: NakshatraPathTable) -> Result<Self, DashaError> {
        table.validate()?;
        self.path_table = Arc::new(table);
        Ok(self)
    }

    /// Share `cache` with this engine.
    pub fn with_cache(mut self, cache: Arc<DashaCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn options(&self) -> &DashaOptions {
        &self.options
    }

    pub fn path_table(&self) -> &NakshatraPathTable {
        &self.path_table
    }

    /// Tree for `system`, served from the cache when one is attached.
    #[instrument(level = "debug", skip(self, snapshot), fields(depth = self.options.depth))]
    pub fn tree(
        &self,
        snapshot: &NatalSnapshot,
        system: DashaSystem,
    ) -> Result<Arc<DashaTree>, DashaError> {
        match &self.cache {
            Some(cache) => {
                let key = CacheKey::new(snapshot, system, &self.options, &self.path_table.version);
                cache.get_or_try_insert_with(key, || self.generate(snapshot, system))
            }
            None => self.generate(snapshot, system).map(Arc::new),
        }
    }

    /// Trees for several systems, in the given order.
    pub fn trees(
        &self,
        snapshot: &NatalSnapshot,
        systems: &[DashaSystem],
    ) -> Result<Vec<Arc<DashaTree>>, DashaError> {
        systems.iter().map(|&s| self.tree(snapshot, s)).collect()
    }

    /// Active periods of `system` at `at_jd`, from Mahadasha down to `depth`.
    ///
    /// `depth` may exceed the engine's materialized depth; deeper levels are
    /// expanded on the fly.
    #[instrument(level = "debug", skip(self, snapshot))]
    pub fn current(
        &self,
        snapshot: &NatalSnapshot,
        system: DashaSystem,
        at_jd: f64,
        depth: u8,
    ) -> Result<DashaSnapshot, DashaError> {
        let tree = self.tree(snapshot, system)?;
        Ok(locate_chain(&tree, at_jd, depth)?)
    }

    fn generate(
        &self,
        snapshot: &NatalSnapshot,
        system: DashaSystem,
    ) -> Result<DashaTree, DashaError> {
        match system {
            DashaSystem::KaalChakra => {
                kaal_chakra_tree_with(snapshot, &self.path_table, &self.options)
            }
            other => dasha_tree(snapshot, other, &self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::types::{ALL_DASHA_SYSTEMS, DAYS_PER_YEAR};
    use crate::error::LocateError;
    use chrono::DateTime;

    fn snapshot() -> NatalSnapshot {
        let birth = DateTime::parse_from_rfc3339("1984-03-09T04:45:00+01:00").unwrap();
        let lons = [
            325.1, 57.9, 211.4, 310.0, 246.2, 298.7, 203.3, 62.5, 242.5,
        ];
        NatalSnapshot::from_longitudes(birth, 281.6, lons).unwrap()
    }

    #[test]
    fn dispatcher_covers_every_system() {
        let s = snapshot();
        let o = DashaOptions::new(2);
        for system in ALL_DASHA_SYSTEMS {
            let tree = dasha_tree(&s, system, &o).unwrap();
            assert_eq!(tree.system, system);
            assert_eq!(tree.start_jd(), s.birth_jd());
            assert_eq!(tree.depth, 2);
        }
    }

    #[test]
    fn engine_rejects_invalid_options() {
        assert!(DashaEngine::new(DashaOptions::new(0)).is_err());
        let mut table = NakshatraPathTable::builtin();
        table.savya_nakshatras.clear();
        let engine = DashaEngine::new(DashaOptions::default()).unwrap();
        assert!(engine.with_path_table(table).is_err());
    }

    #[test]
    fn cached_engine_reuses_trees() {
        let cache = Arc::new(DashaCache::new());
        let engine = DashaEngine::new(DashaOptions::new(2))
            .unwrap()
            .with_cache(Arc::clone(&cache));
        let s = snapshot();
        let a = engine.tree(&s, DashaSystem::Chara).unwrap();
        let b = engine.tree(&s, DashaSystem::Chara).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        engine.trees(&s, &ALL_DASHA_SYSTEMS).unwrap();
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn current_walks_below_materialized_depth() {
        let engine = DashaEngine::new(DashaOptions::new(1)).unwrap();
        let s = snapshot();
        let at = s.birth_jd() + 20.0 * DAYS_PER_YEAR;
        let snap = engine.current(&s, DashaSystem::Vimshottari, at, 3).unwrap();
        assert_eq!(snap.periods.len(), 3);
        assert!(snap.periods.iter().all(|p| p.contains(at)));
    }

    #[test]
    fn current_reports_out_of_range() {
        let engine = DashaEngine::new(DashaOptions::new(1)).unwrap();
        let s = snapshot();
        let err = engine
            .current(&s, DashaSystem::Yogini, s.birth_jd() - 1.0, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            DashaError::Locate(LocateError::BeforeStart { .. })
        ));
        let err = engine
            .current(&s, DashaSystem::Yogini, s.birth_jd() + 40.0 * DAYS_PER_YEAR, 1)
            .unwrap_err();
        assert!(matches!(
            err,
            DashaError::Locate(LocateError::AfterHorizon { .. })
        ));
    }
}
