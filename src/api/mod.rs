//! External recipe and video services.
//!
//! The orchestration code only talks to the [`RecipeApi`] and [`VideoApi`]
//! traits; [`SpoonacularClient`] and [`YoutubeClient`] are the HTTP
//! implementations used in production.

use crate::model::{Recipe, RecipeId, Video};
use async_trait::async_trait;
use thiserror::Error;

mod spoonacular;
mod youtube;

pub use spoonacular::{SpoonacularClient, SpoonacularConfig};
pub use youtube::{YoutubeClient, YoutubeConfig};

/// HTTP status the recipe provider uses to signal an exhausted quota.
pub const QUOTA_EXCEEDED_STATUS: u16 = 402;

/// Default cap on the number of recipes a search returns.
pub const DEFAULT_RESULT_COUNT: u32 = 12;

/// Errors returned by the external services.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{service} request failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} quota exceeded")]
    QuotaExceeded { service: &'static str },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, ApiError::QuotaExceeded { .. })
    }

    /// Maps a response status to an error, `Ok` for any 2xx.
    pub(crate) fn check_status(service: &'static str, status: u16) -> Result<(), ApiError> {
        match status {
            200..=299 => Ok(()),
            QUOTA_EXCEEDED_STATUS => Err(ApiError::QuotaExceeded { service }),
            _ => Err(ApiError::Status { service, status }),
        }
    }
}

/// Parameters of a search by recipe name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    pub query: String,
    pub number: u32,
    /// Comma-joined diet tags, `None` when no dietary filter is active
    pub diet: Option<String>,
    pub add_recipe_information: bool,
    pub fill_ingredients: bool,
}

impl NameQuery {
    pub fn new(query: impl Into<String>) -> Self {
        NameQuery {
            query: query.into(),
            number: DEFAULT_RESULT_COUNT,
            diet: None,
            add_recipe_information: true,
            fill_ingredients: true,
        }
    }
}

/// Parameters of a search by available ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientQuery {
    /// Comma-separated ingredient list, e.g. `"chicken, onion, garlic"`
    pub ingredients: String,
    pub number: u32,
    /// 1 maximizes used ingredients, 2 minimizes missing ones
    pub ranking: u8,
    pub ignore_pantry: bool,
}

impl IngredientQuery {
    pub fn new(ingredients: impl Into<String>) -> Self {
        IngredientQuery {
            ingredients: ingredients.into(),
            number: DEFAULT_RESULT_COUNT,
            ranking: 1,
            ignore_pantry: true,
        }
    }
}

/// A recipe search and lookup service.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Full-text search; the service applies the diet filter itself.
    async fn search_by_name(&self, query: &NameQuery) -> Result<Vec<Recipe>, ApiError>;

    /// Ingredient match; returned records carry no dietary flags.
    async fn search_by_ingredients(&self, query: &IngredientQuery)
        -> Result<Vec<Recipe>, ApiError>;

    /// Full record for one recipe, including dietary flags.
    async fn recipe_information(&self, id: RecipeId) -> Result<Recipe, ApiError>;
}

/// A video search service.
#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(ApiError::check_status("test", 200).is_ok());
        assert!(ApiError::check_status("test", 204).is_ok());
        assert!(ApiError::check_status("test", 402)
            .unwrap_err()
            .is_quota_exceeded());
        assert!(matches!(
            ApiError::check_status("test", 500),
            Err(ApiError::Status { status: 500, .. })
        ));
        assert!(matches!(
            ApiError::check_status("test", 401),
            Err(ApiError::Status { status: 401, .. })
        ));
    }

    #[test]
    fn test_query_defaults() {
        let name = NameQuery::new("pasta carbonara");
        assert_eq!(name.number, 12);
        assert!(name.diet.is_none());
        assert!(name.add_recipe_information);

        let ingredients = IngredientQuery::new("chicken, onion, garlic");
        assert_eq!(ingredients.number, 12);
        assert_eq!(ingredients.ranking, 1);
        assert!(ingredients.ignore_pantry);
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::QuotaExceeded {
            service: "Spoonacular",
        };
        assert_eq!(err.to_string(), "Spoonacular quota exceeded");
        let err = ApiError::Status {
            service: "YouTube",
            status: 403,
        };
        assert_eq!(err.to_string(), "YouTube returned HTTP 403");
    }
}
