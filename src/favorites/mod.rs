//! Saved recipes.
//!
//! The whole collection lives as one JSON array under [`SAVED_RECIPES_KEY`]
//! of a [`StorageBackend`]. Every operation reads the full collection,
//! changes it and writes it back. Only one writer is expected at a time.

use crate::filter::{passes, DietaryFilterSet};
use crate::model::{Recipe, RecipeId};
use thiserror::Error;
use tracing::{debug, warn};

mod storage;

pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};

/// Storage key holding the saved recipe collection.
pub const SAVED_RECIPES_KEY: &str = "savedRecipes";

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Failed to persist saved recipes: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode saved recipes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of [`FavoritesStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The recipe was appended to the collection
    Saved,
    /// A recipe with the same id was already present; nothing changed
    AlreadySaved,
}

impl SaveOutcome {
    /// Notice shown to the user after a save attempt.
    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::Saved => "Recipe saved successfully",
            SaveOutcome::AlreadySaved => "Recipe already saved",
        }
    }
}

/// Result of [`FavoritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Saved,
    Removed,
}

/// Saved recipe snapshots over an injected storage backend.
///
/// # Examples
///
/// ```
/// use chefbot::favorites::{FavoritesStore, MemoryStorage, SaveOutcome};
/// use chefbot::Recipe;
///
/// let store = FavoritesStore::new(MemoryStorage::new());
/// let recipe = Recipe::new(511728, "Pasta Margherita");
///
/// assert_eq!(store.save(&recipe)?, SaveOutcome::Saved);
/// assert_eq!(store.save(&recipe)?, SaveOutcome::AlreadySaved);
/// assert!(store.is_saved(511728));
/// # Ok::<(), chefbot::favorites::FavoritesError>(())
/// ```
pub struct FavoritesStore<B> {
    backend: B,
}

impl<B: StorageBackend> FavoritesStore<B> {
    pub fn new(backend: B) -> Self {
        FavoritesStore { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Appends a snapshot of `recipe` unless its id is already saved.
    pub fn save(&self, recipe: &Recipe) -> Result<SaveOutcome, FavoritesError> {
        let mut recipes = self.list();
        if recipes.iter().any(|r| r.id == recipe.id) {
            debug!(id = recipe.id, "Recipe already saved");
            return Ok(SaveOutcome::AlreadySaved);
        }
        recipes.push(recipe.clone());
        self.persist(&recipes)?;
        debug!(id = recipe.id, count = recipes.len(), "Recipe saved");
        Ok(SaveOutcome::Saved)
    }

    /// Removes every snapshot with `id`. Succeeds when nothing matched.
    pub fn remove(&self, id: RecipeId) -> Result<(), FavoritesError> {
        let mut recipes = self.list();
        recipes.retain(|r| r.id != id);
        self.persist(&recipes)?;
        debug!(id, count = recipes.len(), "Recipe removed");
        Ok(())
    }

    /// All saved snapshots in save order.
    ///
    /// A missing, unreadable or malformed payload yields an empty list.
    pub fn list(&self) -> Vec<Recipe> {
        let payload = match self.backend.read(SAVED_RECIPES_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved recipes");
                return Vec::new();
            }
        };
        match serde_json::from_str(&payload) {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(error = %e, "Ignoring malformed saved recipes");
                Vec::new()
            }
        }
    }

    pub fn is_saved(&self, id: RecipeId) -> bool {
        self.list().iter().any(|r| r.id == id)
    }

    /// Saves the recipe if absent, removes it otherwise.
    pub fn toggle(&self, recipe: &Recipe) -> Result<ToggleOutcome, FavoritesError> {
        if self.is_saved(recipe.id) {
            self.remove(recipe.id)?;
            Ok(ToggleOutcome::Removed)
        } else {
            self.save(recipe)?;
            Ok(ToggleOutcome::Saved)
        }
    }

    /// Saved recipes whose title contains `term` (case-insensitive) and
    /// which pass `filters`. An empty term matches every title.
    pub fn filtered(&self, term: &str, filters: &DietaryFilterSet) -> Vec<Recipe> {
        let term = term.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|r| term.is_empty() || r.title.to_lowercase().contains(&term))
            .filter(|r| passes(r, filters))
            .collect()
    }

    fn persist(&self, recipes: &[Recipe]) -> Result<(), FavoritesError> {
        let payload = serde_json::to_string(recipes)?;
        self.backend.write(SAVED_RECIPES_KEY, &payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DietaryFlag;
    use camino::Utf8PathBuf;
    use indoc::indoc;
    use tempfile::TempDir;

    fn recipe(id: RecipeId, title: &str) -> Recipe {
        Recipe::new(id, title)
    }

    fn memory_store() -> FavoritesStore<MemoryStorage> {
        FavoritesStore::new(MemoryStorage::new())
    }

    /// Backend whose writes always fail.
    struct ReadOnlyStorage;

    impl StorageBackend for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_save_is_idempotent() {
        let store = memory_store();
        let pasta = recipe(1, "Pasta");

        assert_eq!(store.save(&pasta).unwrap(), SaveOutcome::Saved);
        assert_eq!(store.save(&pasta).unwrap(), SaveOutcome::AlreadySaved);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_save_same_id_keeps_first_snapshot() {
        let store = memory_store();
        store.save(&recipe(1, "Original")).unwrap();
        store.save(&recipe(1, "Renamed")).unwrap();

        let saved = store.list();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Original");
    }

    #[test]
    fn test_save_then_list_contains_recipe() {
        let store = memory_store();
        store.save(&recipe(1, "Pasta")).unwrap();
        store.save(&recipe(2, "Soup")).unwrap();

        let ids: Vec<_> = store.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_remove_then_not_saved() {
        let store = memory_store();
        store.save(&recipe(1, "Pasta")).unwrap();
        store.save(&recipe(2, "Soup")).unwrap();

        store.remove(1).unwrap();
        assert!(!store.is_saved(1));
        assert!(store.is_saved(2));

        // Removing an unknown id still succeeds
        store.remove(99).unwrap();
        assert!(!store.is_saved(99));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_on_empty_store() {
        let store = memory_store();
        store.remove(5).unwrap();
        assert!(!store.is_saved(5));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_corrupt_payload_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.write(SAVED_RECIPES_KEY, "{not json").unwrap();
        let store = FavoritesStore::new(storage);

        assert!(store.list().is_empty());
        assert!(!store.is_saved(1));

        // The next save overwrites the corrupt payload
        assert_eq!(store.save(&recipe(1, "Pasta")).unwrap(), SaveOutcome::Saved);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_reads_payload_written_by_web_app() {
        let storage = MemoryStorage::new();
        storage
            .write(
                SAVED_RECIPES_KEY,
                indoc! {r#"
                    [
                        {
                            "id": 654959,
                            "title": "Pasta With Tuna",
                            "image": "https://spoonacular.com/recipeImages/654959-312x231.jpg",
                            "vegetarian": false,
                            "vegan": false,
                            "glutenFree": false,
                            "dairyFree": true,
                            "readyInMinutes": 45,
                            "servings": 4
                        }
                    ]"#},
            )
            .unwrap();
        let store = FavoritesStore::new(storage);

        let saved = store.list();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].dairy_free, Some(true));
        assert!(store.is_saved(654959));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let store = FavoritesStore::new(ReadOnlyStorage);
        let err = store.save(&recipe(1, "Pasta")).unwrap_err();
        assert!(matches!(err, FavoritesError::Storage(_)));
    }

    #[test]
    fn test_toggle() {
        let store = memory_store();
        let soup = recipe(3, "Soup");
        assert_eq!(store.toggle(&soup).unwrap(), ToggleOutcome::Saved);
        assert!(store.is_saved(3));
        assert_eq!(store.toggle(&soup).unwrap(), ToggleOutcome::Removed);
        assert!(!store.is_saved(3));
    }

    #[test]
    fn test_filtered_by_title_and_diet() {
        let store = memory_store();
        let mut margherita = recipe(1, "Pasta Margherita");
        margherita.vegetarian = Some(true);
        let mut tuna = recipe(2, "Pasta With Tuna");
        tuna.vegetarian = Some(false);
        let mut salad = recipe(3, "Green Salad");
        salad.vegetarian = Some(true);
        for r in [&margherita, &tuna, &salad] {
            store.save(r).unwrap();
        }

        let none = DietaryFilterSet::none();
        assert_eq!(store.filtered("", &none).len(), 3);
        assert_eq!(store.filtered("PASTA", &none).len(), 2);

        let vegetarian = DietaryFilterSet::none().with(DietaryFlag::Vegetarian);
        let ids: Vec<_> = store
            .filtered("pasta", &vegetarian)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(store.filtered("", &vegetarian).len(), 2);
    }

    #[test]
    fn test_file_backed_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        let store = FavoritesStore::new(FileStorage::new(dir.clone()));
        store.save(&recipe(10, "Ramen")).unwrap();

        let reopened = FavoritesStore::new(FileStorage::new(dir));
        assert!(reopened.is_saved(10));
        assert_eq!(reopened.list()[0].title, "Ramen");
    }

    #[test]
    fn test_save_outcome_messages() {
        assert_eq!(SaveOutcome::Saved.message(), "Recipe saved successfully");
        assert_eq!(SaveOutcome::AlreadySaved.message(), "Recipe already saved");
    }
}
