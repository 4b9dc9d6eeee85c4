use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a prize category, a short string like `vc17`.
pub type CategoryId = String;

/// Identifier of a single prize within a category, like `vc17-01`.
pub type ItemId = String;

/// Session key composed from room and user identity (`"{room}:{user}"`).
pub type SessionKey = String;

/// The full prize catalog, keyed by category ID.
///
/// Document insertion order is the canonical catalog order, so the map must
/// preserve it for both `list` display and pool refills.
pub type Catalog = IndexMap<CategoryId, Category>;

/// A single drawable prize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeItem {
    /// Display name shown when the prize is drawn.
    pub name: String,
    /// Image reference for the prize; empty when there is none.
    #[serde(default)]
    pub image: String,
}

/// A themed collection of drawable prizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name of the category.
    pub name: String,
    /// Number of selectable box positions shown to the user.
    ///
    /// A display affordance only: it need not equal the item count, and the
    /// chosen box number has no linkage to which prize is drawn.
    pub slots: u32,
    /// Image reference shown when a user selects this category; empty when
    /// there is none.
    #[serde(default)]
    pub selection_image: String,
    /// Prizes in catalog order, keyed by item ID.
    pub items: IndexMap<ItemId, PrizeItem>,
}

impl Category {
    /// Item IDs in catalog order, the content of a freshly reset pool.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.keys().cloned().collect()
    }

    /// Total number of prizes defined for this category.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }
}
