use crate::api::{ApiError, IngredientQuery, NameQuery, RecipeApi};
use crate::filter::passes;
use crate::model::{Recipe, RecipeId};
use thiserror::Error;
use tracing::{debug, warn};

mod model;
mod samples;

pub use model::{QuotaPolicy, SearchMode, SearchParams};
pub use samples::{fallback_recipe, sample_recipes};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please enter a search term")]
    EmptyQuery,

    #[error("Recipe search failed: {0}")]
    Api(#[from] ApiError),
}

impl SearchError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, SearchError::Api(e) if e.is_quota_exceeded())
    }
}

/// Runs a search, returning the quota error as-is if the provider reports one.
///
/// See [`search_with_policy`].
pub async fn search(
    api: &dyn RecipeApi,
    params: &SearchParams,
) -> Result<Vec<Recipe>, SearchError> {
    search_with_policy(api, params, QuotaPolicy::Fail).await
}

/// Runs a search against `api`.
///
/// - By name, one request is sent and the dietary filters travel as the
///   provider's `diet` parameter; results are not filtered again here.
/// - By ingredients, one request is sent. When filters are active, every
///   returned record is looked up one at a time to learn its dietary flags,
///   records failing a filter are dropped and the rest are merged with their
///   detail. Without active filters the match list is returned untouched and
///   no lookups happen.
///
/// Any failure aborts the search; no partial result is returned. Under
/// [`QuotaPolicy::SampleRecipes`] an exhausted quota is not a failure: a
/// rejected search is answered from [`sample_recipes`], and a rejected
/// lookup during the ingredient fan-out is replaced by [`fallback_recipe`]
/// for that record alone while the other candidates are still checked.
pub async fn search_with_policy(
    api: &dyn RecipeApi,
    params: &SearchParams,
    policy: QuotaPolicy,
) -> Result<Vec<Recipe>, SearchError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let result = match params.mode {
        SearchMode::ByName => search_by_name(api, query, params).await,
        SearchMode::ByIngredients => search_by_ingredients(api, query, params, policy).await,
    };

    match result {
        Err(e) if e.is_quota_exceeded() && policy == QuotaPolicy::SampleRecipes => {
            warn!("Recipe quota exceeded, answering from sample recipes");
            Ok(sample_recipes()
                .into_iter()
                .filter(|recipe| passes(recipe, &params.filters))
                .collect())
        }
        other => other.map_err(SearchError::from),
    }
}

async fn search_by_name(
    api: &dyn RecipeApi,
    query: &str,
    params: &SearchParams,
) -> Result<Vec<Recipe>, ApiError> {
    let mut request = NameQuery::new(query);
    if params.filters.is_active() {
        request.diet = Some(params.filters.diet_tags());
    }
    debug!(query, diet = ?request.diet, "Searching recipes by name");
    api.search_by_name(&request).await
}

async fn search_by_ingredients(
    api: &dyn RecipeApi,
    ingredients: &str,
    params: &SearchParams,
    policy: QuotaPolicy,
) -> Result<Vec<Recipe>, ApiError> {
    debug!(ingredients, "Searching recipes by ingredients");
    let matches = api
        .search_by_ingredients(&IngredientQuery::new(ingredients))
        .await?;

    if !params.filters.is_active() {
        return Ok(matches);
    }

    // Matches carry no dietary flags; look each one up in turn.
    let mut kept = Vec::new();
    for summary in matches {
        let detail = recipe_information_with_policy(api, summary.id, policy).await?;
        if passes(&detail, &params.filters) {
            kept.push(summary.merge_detail(detail));
        } else {
            debug!(id = detail.id, "Dropping recipe that fails dietary filters");
        }
    }
    Ok(kept)
}

/// Looks up one full record. Under [`QuotaPolicy::SampleRecipes`] an
/// exhausted quota yields [`fallback_recipe`] instead of an error.
pub async fn recipe_information_with_policy(
    api: &dyn RecipeApi,
    id: RecipeId,
    policy: QuotaPolicy,
) -> Result<Recipe, ApiError> {
    match api.recipe_information(id).await {
        Err(e) if e.is_quota_exceeded() && policy == QuotaPolicy::SampleRecipes => {
            warn!(id, "Recipe quota exceeded, answering lookup from sample recipes");
            Ok(fallback_recipe(id))
        }
        other => other,
    }
}
