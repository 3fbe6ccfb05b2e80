use std::collections::HashSet;

use routine_model::CatalogItem;

use crate::{Storage, StorageError};

/// The storage key the selection is persisted under.
pub const SELECTION_KEY: &str = "selectedProducts";

/// The set of catalog items a user has picked.
///
/// Items keep the order they were selected in and are unique by id.
/// Every mutation writes the whole set to the backing [`Storage`]. A
/// failed write is reported to the caller, but the in-memory change is
/// kept either way.
#[derive(Debug)]
pub struct SelectionStore<S> {
    items: Vec<CatalogItem>,
    storage: S,
}

impl<S: Storage> SelectionStore<S> {
    /// Opens a store, restoring the previously persisted selection.
    ///
    /// A missing, unreadable or corrupted entry yields an empty
    /// selection. The problem is logged and otherwise ignored.
    pub fn open(storage: S) -> Self {
        let items = match load_selection(&storage) {
            Ok(items) => items,
            Err(err) => {
                warn!("ignoring persisted selection: {err}");
                Vec::new()
            }
        };
        debug!("restored {} selected item(s)", items.len());
        Self { items, storage }
    }

    /// Returns the selected items in selection order.
    #[inline]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Returns the number of selected items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns whether the item with `id` is selected.
    pub fn is_selected(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns the backing storage.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Selects `item` if it isn't selected yet, deselects it otherwise.
    ///
    /// Returns whether the item is selected afterwards.
    pub fn toggle(&mut self, item: &CatalogItem) -> Result<bool, StorageError> {
        let selected = match self.position(item.id) {
            Some(idx) => {
                self.items.remove(idx);
                false
            }
            None => {
                self.items.push(item.clone());
                true
            }
        };
        debug!(id = item.id, selected, "toggled item");
        self.persist()?;
        Ok(selected)
    }

    /// Deselects the item with `id`. Does nothing if it isn't selected.
    pub fn remove(&mut self, id: u64) -> Result<(), StorageError> {
        self.items.retain(|item| item.id != id);
        self.persist()
    }

    /// Deselects everything.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    #[inline]
    fn position(&self, id: u64) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.items)?;
        self.storage.set(SELECTION_KEY, &encoded)
    }
}

/// Why a persisted selection could not be restored.
#[derive(Debug, thiserror::Error)]
enum StorageParseError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("corrupted selection: {0}")]
    Corrupted(#[from] serde_json::Error),
}

fn load_selection<S: Storage>(
    storage: &S,
) -> Result<Vec<CatalogItem>, StorageParseError> {
    let Some(stored) = storage.get(SELECTION_KEY)? else {
        return Ok(Vec::new());
    };
    let mut items: Vec<CatalogItem> = serde_json::from_str(&stored)?;

    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.id));
    Ok(items)
}
