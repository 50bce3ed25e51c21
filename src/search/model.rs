use crate::filter::DietaryFilterSet;
use serde::{Deserialize, Serialize};

/// Which search endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Free-text search on recipe names
    #[default]
    ByName,
    /// Comma-separated list of ingredients on hand
    ByIngredients,
}

/// One search submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub mode: SearchMode,
    #[serde(default)]
    pub filters: DietaryFilterSet,
}

impl SearchParams {
    pub fn by_name(query: impl Into<String>) -> Self {
        SearchParams {
            query: query.into(),
            mode: SearchMode::ByName,
            filters: DietaryFilterSet::none(),
        }
    }

    pub fn by_ingredients(ingredients: impl Into<String>) -> Self {
        SearchParams {
            query: ingredients.into(),
            mode: SearchMode::ByIngredients,
            filters: DietaryFilterSet::none(),
        }
    }

    pub fn with_filters(mut self, filters: DietaryFilterSet) -> Self {
        self.filters = filters;
        self
    }
}

/// What to do when the recipe provider reports an exhausted quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotaPolicy {
    /// Return the quota error to the caller
    #[default]
    Fail,
    /// Answer from the built-in sample recipes, filtered like a live search
    SampleRecipes,
}
