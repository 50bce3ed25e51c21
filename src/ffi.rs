//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Recipes cross the boundary as flat records carrying display-ready fields
//! plus the full record as JSON, so a recipe handed back (to save it, say)
//! loses nothing. Persistence is supplied by the host through
//! [`FfiKeyValueStore`].

use crate::api::{
    ApiError, RecipeApi, SpoonacularClient, SpoonacularConfig, VideoApi, YoutubeClient,
    YoutubeConfig,
};
use crate::config::{ChefbotConfig, ConfigError};
use crate::favorites::{
    FavoritesError, FavoritesStore, SaveOutcome, StorageBackend, StorageError,
};
use crate::fetcher::{get_recipe_detail_with_policy, FetchError, RecipeDetail};
use crate::filter::{passes, DietaryFilterSet};
use crate::model::{Recipe, Step, Video};
use crate::search::{search_with_policy, QuotaPolicy, SearchError, SearchMode, SearchParams};
use crate::session::{
    Access, AuthError, LocalAuthProvider, Session, SessionState, Subscription,
};
use std::sync::{Arc, Mutex};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum ChefbotError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Service error: {message}")]
    ServiceError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Authentication error: {message}")]
    AuthError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl From<ApiError> for ChefbotError {
    fn from(e: ApiError) -> Self {
        if e.is_quota_exceeded() {
            ChefbotError::QuotaExceeded {
                message: e.to_string(),
            }
        } else {
            ChefbotError::ServiceError {
                message: e.to_string(),
            }
        }
    }
}

impl From<SearchError> for ChefbotError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::EmptyQuery => ChefbotError::InvalidInput {
                message: e.to_string(),
            },
            SearchError::Api(e) => e.into(),
        }
    }
}

impl From<FetchError> for ChefbotError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Api(e) => e.into(),
        }
    }
}

impl From<StorageError> for ChefbotError {
    fn from(e: StorageError) -> Self {
        ChefbotError::StorageError {
            message: e.to_string(),
        }
    }
}

impl From<FavoritesError> for ChefbotError {
    fn from(e: FavoritesError) -> Self {
        ChefbotError::StorageError {
            message: e.to_string(),
        }
    }
}

impl From<AuthError> for ChefbotError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials(message) => ChefbotError::AuthError { message },
            AuthError::Storage(e) => e.into(),
            AuthError::Encode(e) => ChefbotError::StorageError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for ChefbotError {
    fn from(e: ConfigError) -> Self {
        ChefbotError::ConfigError {
            message: e.to_string(),
        }
    }
}

// Foreign implementations of FfiKeyValueStore may fail in ways the
// generated code cannot map.
impl From<uniffi::UnexpectedUniFFICallbackError> for ChefbotError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        ChefbotError::StorageError { message: e.reason }
    }
}

/// Dietary toggles for a search or a saved-recipe filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, uniffi::Record)]
pub struct FfiDietaryFilters {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}

impl From<FfiDietaryFilters> for DietaryFilterSet {
    fn from(f: FfiDietaryFilters) -> Self {
        DietaryFilterSet {
            vegetarian: f.vegetarian,
            vegan: f.vegan,
            gluten_free: f.gluten_free,
            dairy_free: f.dairy_free,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSearchMode {
    ByName,
    ByIngredients,
}

impl From<FfiSearchMode> for SearchMode {
    fn from(mode: FfiSearchMode) -> Self {
        match mode {
            FfiSearchMode::ByName => SearchMode::ByName,
            FfiSearchMode::ByIngredients => SearchMode::ByIngredients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiStep {
    pub number: u32,
    pub step: String,
}

impl From<&Step> for FfiStep {
    fn from(s: &Step) -> Self {
        FfiStep {
            number: s.number,
            step: s.step.clone(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    /// Labels of the dietary flags known to hold
    pub badges: Vec<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    /// Ingredient match line for ingredient searches
    pub match_summary: Option<String>,
    /// Plain-text summary, markup removed
    pub summary: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<FfiStep>,
    pub source_url: Option<String>,
    /// The complete record as JSON
    pub raw_json: String,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        let raw_json = serde_json::to_string(r).unwrap_or_default();

        FfiRecipe {
            id: r.id,
            title: r.title.clone(),
            image: r.image.clone(),
            badges: r.badges().into_iter().map(str::to_string).collect(),
            ready_in_minutes: r.ready_in_minutes,
            servings: r.servings,
            match_summary: r.match_summary(),
            summary: r.summary_text(),
            ingredients: r.ingredient_lines(),
            steps: r.steps().iter().map(FfiStep::from).collect(),
            source_url: r.source_url.clone(),
            raw_json,
        }
    }
}

impl TryFrom<&FfiRecipe> for Recipe {
    type Error = ChefbotError;

    fn try_from(r: &FfiRecipe) -> Result<Self, Self::Error> {
        serde_json::from_str(&r.raw_json).map_err(|e| ChefbotError::InvalidInput {
            message: format!("Malformed recipe {}: {e}", r.id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiVideo {
    pub id: String,
    pub title: String,
    pub channel: String,
    /// RFC 3339 timestamp
    pub published_at: String,
    pub embed_url: String,
    pub caption: String,
}

impl From<&Video> for FfiVideo {
    fn from(v: &Video) -> Self {
        FfiVideo {
            id: v.id.clone(),
            title: v.title.clone(),
            channel: v.channel.clone(),
            published_at: v.published_at.to_rfc3339(),
            embed_url: v.embed_url(),
            caption: v.caption(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipeDetail {
    pub recipe: FfiRecipe,
    pub video: Option<FfiVideo>,
}

impl From<&RecipeDetail> for FfiRecipeDetail {
    fn from(d: &RecipeDetail) -> Self {
        FfiRecipeDetail {
            recipe: FfiRecipe::from(&d.recipe),
            video: d.video.as_ref().map(FfiVideo::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSaveOutcome {
    Saved,
    AlreadySaved,
}

impl From<SaveOutcome> for FfiSaveOutcome {
    fn from(o: SaveOutcome) -> Self {
        match o {
            SaveOutcome::Saved => FfiSaveOutcome::Saved,
            SaveOutcome::AlreadySaved => FfiSaveOutcome::AlreadySaved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSessionState {
    Unauthenticated,
    Authenticated { email: String },
}

impl From<&SessionState> for FfiSessionState {
    fn from(s: &SessionState) -> Self {
        match s {
            SessionState::Unauthenticated => FfiSessionState::Unauthenticated,
            SessionState::Authenticated(identity) => FfiSessionState::Authenticated {
                email: identity.email.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiAccess {
    Granted { email: String },
    Redirect { to: String },
}

impl From<Access> for FfiAccess {
    fn from(a: Access) -> Self {
        match a {
            Access::Granted(identity) => FfiAccess::Granted {
                email: identity.email,
            },
            Access::Redirect { to } => FfiAccess::Redirect { to: to.to_string() },
        }
    }
}

// ============================================================================
// Host-provided persistence
// ============================================================================

/// Key-value slots supplied by the host platform (e.g. user defaults or
/// shared preferences).
#[uniffi::export(with_foreign)]
pub trait FfiKeyValueStore: Send + Sync {
    fn get(&self, key: String) -> Option<String>;

    fn set(&self, key: String, value: String) -> Result<(), ChefbotError>;

    fn remove(&self, key: String) -> Result<(), ChefbotError>;
}

/// Adapts a host store to [`StorageBackend`].
#[derive(Clone)]
pub struct ForeignStorage {
    store: Arc<dyn FfiKeyValueStore>,
}

impl ForeignStorage {
    pub fn new(store: Arc<dyn FfiKeyValueStore>) -> Self {
        ForeignStorage { store }
    }
}

impl StorageBackend for ForeignStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.store.get(key.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store
            .set(key.to_string(), value.to_string())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store
            .remove(key.to_string())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

// ============================================================================
// Objects
// ============================================================================

/// Search and detail entry point.
#[derive(uniffi::Object)]
pub struct FfiChefbot {
    recipes: Arc<dyn RecipeApi>,
    videos: Arc<dyn VideoApi>,
    policy: QuotaPolicy,
}

impl FfiChefbot {
    fn with_apis(
        recipes: Arc<dyn RecipeApi>,
        videos: Arc<dyn VideoApi>,
        policy: QuotaPolicy,
    ) -> Self {
        FfiChefbot {
            recipes,
            videos,
            policy,
        }
    }

    fn from_config(config: &ChefbotConfig) -> Self {
        Self::with_apis(
            Arc::new(SpoonacularClient::new(config.spoonacular())),
            Arc::new(YoutubeClient::new(config.youtube())),
            config.quota_policy(),
        )
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiChefbot {
    /// Creates a client for the public services.
    ///
    /// With `quota_fallback` set, an exhausted recipe quota is answered from
    /// bundled sample recipes instead of an error.
    #[uniffi::constructor]
    pub fn new(
        spoonacular_api_key: String,
        youtube_api_key: String,
        quota_fallback: bool,
    ) -> Arc<Self> {
        let policy = if quota_fallback {
            QuotaPolicy::SampleRecipes
        } else {
            QuotaPolicy::Fail
        };
        Arc::new(Self::with_apis(
            Arc::new(SpoonacularClient::new(SpoonacularConfig::new(
                spoonacular_api_key,
            ))),
            Arc::new(YoutubeClient::new(YoutubeConfig::new(youtube_api_key))),
            policy,
        ))
    }

    /// Creates a client configured from the process environment.
    #[uniffi::constructor]
    pub fn from_env() -> Result<Arc<Self>, ChefbotError> {
        let config = ChefbotConfig::from_env()?;
        Ok(Arc::new(Self::from_config(&config)))
    }

    /// Searches recipes by name or by a comma-separated ingredient list.
    pub async fn search(
        &self,
        query: String,
        mode: FfiSearchMode,
        filters: FfiDietaryFilters,
    ) -> Result<Vec<FfiRecipe>, ChefbotError> {
        let params = SearchParams {
            query,
            mode: mode.into(),
            filters: filters.into(),
        };
        let results = search_with_policy(self.recipes.as_ref(), &params, self.policy).await?;
        Ok(results.iter().map(FfiRecipe::from).collect())
    }

    /// Loads the full recipe and its first matching video. With the quota
    /// fallback enabled, sample recipes can be opened once the quota is spent.
    pub async fn recipe_detail(&self, id: u64) -> Result<FfiRecipeDetail, ChefbotError> {
        let detail = get_recipe_detail_with_policy(
            self.recipes.as_ref(),
            self.videos.as_ref(),
            id,
            self.policy,
        )
        .await?;
        Ok(FfiRecipeDetail::from(&detail))
    }
}

/// Saved recipes kept in the host's key-value store.
#[derive(uniffi::Object)]
pub struct FfiFavorites {
    inner: FavoritesStore<ForeignStorage>,
}

#[uniffi::export]
impl FfiFavorites {
    #[uniffi::constructor]
    pub fn new(store: Arc<dyn FfiKeyValueStore>) -> Arc<Self> {
        Arc::new(FfiFavorites {
            inner: FavoritesStore::new(ForeignStorage::new(store)),
        })
    }

    pub fn save(&self, recipe: FfiRecipe) -> Result<FfiSaveOutcome, ChefbotError> {
        let recipe = Recipe::try_from(&recipe)?;
        Ok(self.inner.save(&recipe)?.into())
    }

    pub fn remove(&self, id: u64) -> Result<(), ChefbotError> {
        Ok(self.inner.remove(id)?)
    }

    pub fn list(&self) -> Vec<FfiRecipe> {
        self.inner.list().iter().map(FfiRecipe::from).collect()
    }

    pub fn is_saved(&self, id: u64) -> bool {
        self.inner.is_saved(id)
    }

    /// Saved recipes matching a title term and dietary filters.
    pub fn filtered(&self, term: String, filters: FfiDietaryFilters) -> Vec<FfiRecipe> {
        self.inner
            .filtered(&term, &filters.into())
            .iter()
            .map(FfiRecipe::from)
            .collect()
    }
}

/// Receives session state changes.
#[uniffi::export(with_foreign)]
pub trait FfiSessionListener: Send + Sync {
    fn on_change(&self, state: FfiSessionState);
}

/// Handle returned by [`FfiSession::subscribe`].
///
/// The listener stays registered until `cancel` is called or the handle is
/// released.
#[derive(uniffi::Object)]
pub struct FfiSubscription {
    inner: Mutex<Option<Subscription>>,
}

#[uniffi::export]
impl FfiSubscription {
    pub fn cancel(&self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.take();
    }
}

/// Device-local sign-in and the gate for protected views.
#[derive(uniffi::Object)]
pub struct FfiSession {
    inner: Session<LocalAuthProvider<ForeignStorage>>,
}

#[uniffi::export]
impl FfiSession {
    #[uniffi::constructor]
    pub fn new(store: Arc<dyn FfiKeyValueStore>) -> Arc<Self> {
        Arc::new(FfiSession {
            inner: Session::new(LocalAuthProvider::new(ForeignStorage::new(store))),
        })
    }

    /// Restores a session persisted by an earlier launch.
    pub fn restore(&self) -> FfiSessionState {
        FfiSessionState::from(&self.inner.restore())
    }

    pub fn login(&self, email: String, password: String) -> Result<FfiSessionState, ChefbotError> {
        self.inner.login(&email, &password)?;
        Ok(self.state())
    }

    pub fn logout(&self) -> Result<(), ChefbotError> {
        Ok(self.inner.logout()?)
    }

    pub fn state(&self) -> FfiSessionState {
        FfiSessionState::from(&self.inner.gate().state())
    }

    /// Access decision for a view that requires a signed-in user.
    pub fn guard(&self) -> FfiAccess {
        self.inner.gate().guard().into()
    }

    pub fn subscribe(&self, listener: Arc<dyn FfiSessionListener>) -> Arc<FfiSubscription> {
        let subscription = self
            .inner
            .gate()
            .subscribe(move |state| listener.on_change(FfiSessionState::from(state)));
        Arc::new(FfiSubscription {
            inner: Mutex::new(Some(subscription)),
        })
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Returns true if the recipe satisfies every active dietary filter.
#[uniffi::export]
pub fn dietary_passes(recipe: FfiRecipe, filters: FfiDietaryFilters) -> Result<bool, ChefbotError> {
    let recipe = Recipe::try_from(&recipe)?;
    Ok(passes(&recipe, &filters.into()))
}

/// Returns the provider's comma-joined diet tags for the active filters.
#[uniffi::export]
pub fn diet_tags(filters: FfiDietaryFilters) -> String {
    DietaryFilterSet::from(filters).diet_tags()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
