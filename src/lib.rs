uniffi::setup_scaffolding!();

pub mod api;
pub mod config;
pub mod favorites;
pub mod fetcher;
pub mod ffi;
pub mod filter;
pub mod logging;
pub mod model;
pub mod search;
pub mod session;
pub mod text;

#[cfg(test)]
mod test_support;

pub use config::{ChefbotConfig, ConfigError};
pub use fetcher::{get_recipe_detail, get_recipe_detail_with_policy, FetchError, RecipeDetail};
pub use filter::{passes, DietaryFilterSet, DietaryFlag};
pub use model::*;
pub use search::{search, search_with_policy, QuotaPolicy, SearchError, SearchMode, SearchParams};
