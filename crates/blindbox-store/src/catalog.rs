//! Read-only prize catalog with first-run seeding.
//!
//! The catalog document is administrator-owned: this store seeds a default
//! set on first run, loads it at startup, and never mutates it afterwards.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use blindbox_core::{Catalog, Category, PrizeItem, Result};

use crate::document;

/// File name of the catalog document under the data directory.
pub const CATALOG_FILE: &str = "box_config.json";

/// The prize catalog, loaded once at startup.
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogStore {
    /// Open the catalog under `data_dir`, seeding the default document on
    /// first run. Seeding never overwrites an existing file; a corrupt file
    /// degrades to an empty catalog.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CATALOG_FILE);
        if !path.exists() {
            document::save(&path, &default_catalog())?;
            info!("Seeded default catalog at {}", path.display());
        }
        let catalog = document::load_or_default(&path);
        Ok(Self { path, catalog })
    }

    /// Look up a category by ID.
    pub fn get(&self, category_id: &str) -> Option<&Category> {
        self.catalog.get(category_id)
    }

    /// Whether a category with this ID exists.
    pub fn contains(&self, category_id: &str) -> bool {
        self.catalog.contains_key(category_id)
    }

    /// The full catalog, in document order.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the catalog has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The catalog seeded on first run: two example pass-holder blind box series.
fn default_catalog() -> Catalog {
    fn item(name: &str, image: &str) -> PrizeItem {
        PrizeItem {
            name: name.to_string(),
            image: image.to_string(),
        }
    }

    let mut vc17_items = IndexMap::new();
    vc17_items.insert(
        "vc17-01".to_string(),
        item("山 通行证卡套", "https://example.com/ak-vc17-01.jpg"),
    );
    vc17_items.insert(
        "vc17-02".to_string(),
        item("W 通行证卡套", "https://example.com/ak-vc17-02.jpg"),
    );
    vc17_items.insert(
        "vc17-03".to_string(),
        item("缪尔赛思 通行证卡套", "https://example.com/ak-vc17-03.jpg"),
    );

    let mut anniv_items = IndexMap::new();
    anniv_items.insert(
        "anniv-01".to_string(),
        item("阿米娅 通行证卡套", "https://example.com/ak-anniv-01.jpg"),
    );
    anniv_items.insert(
        "anniv-02".to_string(),
        item("能天使 通行证卡套", "https://example.com/ak-anniv-02.jpg"),
    );

    let mut catalog = Catalog::new();
    catalog.insert(
        "vc17".to_string(),
        Category {
            name: "2024音律联觉通行证盲盒".to_string(),
            slots: 14,
            selection_image: "https://example.com/ak-vc17-selection.jpg".to_string(),
            items: vc17_items,
        },
    );
    catalog.insert(
        "anniv".to_string(),
        Category {
            name: "周年系列通行证盲盒".to_string(),
            slots: 12,
            selection_image: "https://example.com/ak-anniv-selection.jpg".to_string(),
            items: anniv_items,
        },
    );
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_seeds_default_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.contains("vc17"));
        assert!(store.contains("anniv"));
        assert!(dir.path().join(CATALOG_FILE).exists());
    }

    #[test]
    fn test_seeding_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CATALOG_FILE);

        // An administrator-edited document must survive restarts untouched.
        std::fs::write(
            &path,
            r#"{"custom": {"name": "自定义", "slots": 5, "items": {"c-01": {"name": "奖品"}}}}"#,
        )
        .unwrap();

        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.contains("custom"));
        assert!(!store.contains("vc17"));

        let again = CatalogStore::open(dir.path()).unwrap();
        assert!(again.contains("custom"));
    }

    #[test]
    fn test_get_returns_category_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let category = store.get("vc17").unwrap();
        assert_eq!(category.name, "2024音律联觉通行证盲盒");
        assert_eq!(category.slots, 14);
        assert_eq!(category.total_items(), 3);
        assert!(!category.selection_image.is_empty());
    }

    #[test]
    fn test_get_unknown_category() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_corrupt_document_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATALOG_FILE), "{ broken").unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_catalog_preserves_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        let ids: Vec<&String> = store.catalog().keys().collect();
        assert_eq!(ids, vec!["vc17", "anniv"]);
    }

    #[test]
    fn test_seeded_document_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        CatalogStore::open(dir.path()).unwrap();
        let raw = std::fs::read_to_string(dir.path().join(CATALOG_FILE)).unwrap();
        assert!(raw.contains('\n'));
        assert!(raw.contains("通行证卡套"));
    }
}
