//! Per-category draw pools.
//!
//! A pool holds the item IDs not yet drawn from a category. Draws remove one
//! ID uniformly at random; a pool emptied by a draw is refilled in the same
//! call, so the next draw always finds a non-empty pool while the emptying
//! draw itself reports 0 remaining with a reset notice.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info};

use blindbox_core::{BlindBoxError, Catalog, Category, CategoryId, ItemId, Result};

use crate::document;

/// File name of the pool document under the data directory.
pub const POOL_FILE: &str = "pool_state.json";

/// Result of a single draw, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The item ID removed from the pool.
    pub item_id: ItemId,
    /// Remaining count after this draw. 0 when the draw emptied the pool,
    /// even though the pool has already been refilled for the next call.
    pub remaining: usize,
    /// Whether this draw emptied the pool and triggered the automatic reset.
    pub pool_reset: bool,
}

/// Manager of the remaining-item pools, one per category.
pub struct PoolManager {
    path: PathBuf,
    pools: HashMap<CategoryId, Vec<ItemId>>,
}

impl PoolManager {
    /// Open the pool document under `data_dir`. Missing or corrupt documents
    /// degrade to an empty state; pools refill lazily on first access.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join(POOL_FILE);
        let pools = document::load_or_default(&path);
        Self { path, pools }
    }

    /// Fill the pool of every catalog category that has no entry yet.
    /// Persists only when something changed. Called once at startup.
    pub fn ensure_initialized(&mut self, catalog: &Catalog) -> Result<()> {
        let mut changed = false;
        for (category_id, category) in catalog {
            if !self.pools.contains_key(category_id) {
                self.pools.insert(category_id.clone(), category.item_ids());
                changed = true;
            }
        }
        if changed {
            self.persist()?;
            info!("Initialized draw pools at {}", self.path.display());
        }
        Ok(())
    }

    /// Remaining item count for a category; 0 when it has no pool entry.
    pub fn remaining(&self, category_id: &str) -> usize {
        self.pools.get(category_id).map_or(0, Vec::len)
    }

    /// Draw one item uniformly at random from a category's pool.
    ///
    /// An empty or missing pool is refilled from the category before the
    /// draw. The draw and any automatic reset are persisted before returning.
    pub fn draw(&mut self, category_id: &str, category: &Category) -> Result<DrawOutcome> {
        if category.items.is_empty() {
            return Err(BlindBoxError::Config(format!(
                "category `{}` has no items to draw",
                category_id
            )));
        }

        let pool = self.pools.entry(category_id.to_string()).or_default();
        if pool.is_empty() {
            *pool = category.item_ids();
        }

        let index = rand::rng().random_range(0..pool.len());
        let item_id = pool.remove(index);
        let remaining = pool.len();
        self.persist()?;

        let pool_reset = remaining == 0;
        if pool_reset {
            self.pools
                .insert(category_id.to_string(), category.item_ids());
            self.persist()?;
            debug!(category_id, "Pool exhausted, reset to full item set");
        }

        Ok(DrawOutcome {
            item_id,
            remaining,
            pool_reset,
        })
    }

    /// Write the current pool state to the backing document.
    pub fn flush(&self) -> Result<()> {
        self.persist()
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        document::save(&self.path, &self.pools)
            .map_err(|e| BlindBoxError::Storage(format!("Failed to save pool state: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    use blindbox_core::PrizeItem;

    fn category(item_ids: &[&str]) -> Category {
        let mut items = IndexMap::new();
        for id in item_ids {
            items.insert(
                id.to_string(),
                PrizeItem {
                    name: format!("奖品 {}", id),
                    image: String::new(),
                },
            );
        }
        Category {
            name: "测试盲盒".to_string(),
            slots: 14,
            selection_image: String::new(),
            items,
        }
    }

    fn catalog_with(category_id: &str, item_ids: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(category_id.to_string(), category(item_ids));
        catalog
    }

    fn persisted_pools(manager: &PoolManager) -> HashMap<String, Vec<String>> {
        document::load(manager.path()).unwrap()
    }

    #[test]
    fn test_ensure_initialized_fills_missing_pools() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let catalog = catalog_with("vc17", &["a", "b", "c"]);

        manager.ensure_initialized(&catalog).unwrap();
        assert_eq!(manager.remaining("vc17"), 3);
        assert_eq!(persisted_pools(&manager)["vc17"].len(), 3);
    }

    #[test]
    fn test_ensure_initialized_keeps_existing_pools() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(POOL_FILE),
            r#"{"vc17": ["b"]}"#,
        )
        .unwrap();

        let mut manager = PoolManager::open(dir.path());
        manager
            .ensure_initialized(&catalog_with("vc17", &["a", "b", "c"]))
            .unwrap();

        // A partially drawn pool must survive restarts untouched.
        assert_eq!(manager.remaining("vc17"), 1);
    }

    #[test]
    fn test_remaining_absent_category_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let manager = PoolManager::open(dir.path());
        assert_eq!(manager.remaining("vc17"), 0);
    }

    #[test]
    fn test_draw_without_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["a", "b", "c"]);
        let catalog = catalog_with("vc17", &["a", "b", "c"]);
        manager.ensure_initialized(&catalog).unwrap();

        let outcome = manager.draw("vc17", &cat).unwrap();
        assert_eq!(outcome.remaining, 2);
        assert!(!outcome.pool_reset);

        let persisted = persisted_pools(&manager);
        assert_eq!(persisted["vc17"].len(), 2);
        assert!(!persisted["vc17"].contains(&outcome.item_id));
    }

    #[test]
    fn test_draw_from_missing_pool_refills_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["a", "b", "c"]);

        // No ensure_initialized: the pool entry does not exist yet.
        let outcome = manager.draw("vc17", &cat).unwrap();
        assert_eq!(outcome.remaining, 2);
        assert_eq!(manager.remaining("vc17"), 2);
    }

    #[test]
    fn test_eager_reset_on_exhaustion() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["a", "b", "c"]);
        let catalog = catalog_with("vc17", &["a", "b", "c"]);
        manager.ensure_initialized(&catalog).unwrap();

        let mut drawn = Vec::new();
        for _ in 0..2 {
            let outcome = manager.draw("vc17", &cat).unwrap();
            assert!(!outcome.pool_reset);
            drawn.push(outcome.item_id);
        }

        let last = manager.draw("vc17", &cat).unwrap();
        drawn.push(last.item_id.clone());
        assert_eq!(last.remaining, 0);
        assert!(last.pool_reset);

        // The three draws covered the whole item set exactly once.
        drawn.sort();
        assert_eq!(drawn, vec!["a", "b", "c"]);

        // The persisted pool is already full again for the next draw.
        assert_eq!(persisted_pools(&manager)["vc17"].len(), 3);
        assert_eq!(manager.remaining("vc17"), 3);
    }

    #[test]
    fn test_draw_succeeds_after_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["a", "b", "c"]);

        for _ in 0..3 {
            manager.draw("vc17", &cat).unwrap();
        }
        let outcome = manager.draw("vc17", &cat).unwrap();
        assert_eq!(outcome.remaining, 2);
        assert!(!outcome.pool_reset);
    }

    #[test]
    fn test_single_item_category_resets_every_draw() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["only"]);

        for _ in 0..4 {
            let outcome = manager.draw("solo", &cat).unwrap();
            assert_eq!(outcome.item_id, "only");
            assert_eq!(outcome.remaining, 0);
            assert!(outcome.pool_reset);
        }
    }

    #[test]
    fn test_draw_empty_item_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&[]);
        assert!(manager.draw("hollow", &cat).is_err());
    }

    #[test]
    fn test_draws_are_roughly_uniform() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        let cat = category(&["a", "b", "c"]);

        // Every third draw starts from a full pool; those first-of-cycle
        // draws are the uniform samples.
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..300 {
            for position in 0..3 {
                let outcome = manager.draw("vc17", &cat).unwrap();
                if position == 0 {
                    *counts.entry(outcome.item_id).or_default() += 1;
                }
            }
        }

        assert_eq!(counts.values().sum::<usize>(), 300);
        for (item, count) in &counts {
            assert!(
                (40..=180).contains(count),
                "item {} drawn {} times out of 300 cycle starts",
                item,
                count
            );
        }
    }

    #[test]
    fn test_flush_writes_current_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = PoolManager::open(dir.path());
        manager
            .ensure_initialized(&catalog_with("vc17", &["a", "b"]))
            .unwrap();

        std::fs::remove_file(manager.path()).unwrap();
        manager.flush().unwrap();
        assert_eq!(persisted_pools(&manager)["vc17"].len(), 2);
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let cat = category(&["a", "b", "c"]);
        {
            let mut manager = PoolManager::open(dir.path());
            manager.draw("vc17", &cat).unwrap();
        }
        let reopened = PoolManager::open(dir.path());
        assert_eq!(reopened.remaining("vc17"), 2);
    }
}
