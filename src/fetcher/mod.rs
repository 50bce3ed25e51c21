//! Recipe detail loading.
//!
//! A detail view needs the full recipe record plus a cooking video to embed.
//! The video is looked up by the recipe's title once the record is in hand.

use crate::api::{ApiError, RecipeApi, VideoApi};
use crate::model::{Recipe, RecipeId, Video};
use crate::search::{recipe_information_with_policy, QuotaPolicy};
use thiserror::Error;
use tracing::{debug, warn};

/// How many video candidates are requested per recipe.
pub const VIDEO_CANDIDATES: u32 = 5;

/// Errors that can occur when loading a recipe detail view.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to load recipe details: {0}")]
    Api(#[from] ApiError),
}

/// Everything a recipe detail view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    /// First matching video, `None` if nothing was found or the lookup failed
    pub video: Option<Video>,
}

/// Query text used to find a video for a recipe title.
pub fn video_query(title: &str) -> String {
    format!("{} recipe", title.trim())
}

/// Loads the full record for `id` followed by its video.
///
/// A failed recipe lookup is an error. A failed video lookup is not: the
/// detail is still returned, without a video.
///
/// # Examples
///
/// ```no_run
/// use chefbot::api::{SpoonacularClient, SpoonacularConfig, YoutubeClient, YoutubeConfig};
/// use chefbot::get_recipe_detail;
///
/// # async fn run() -> Result<(), chefbot::FetchError> {
/// let recipes = SpoonacularClient::new(SpoonacularConfig::new("recipe-key"));
/// let videos = YoutubeClient::new(YoutubeConfig::new("video-key"));
/// let detail = get_recipe_detail(&recipes, &videos, 716429).await?;
/// println!("{}", detail.recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn get_recipe_detail(
    recipes: &dyn RecipeApi,
    videos: &dyn VideoApi,
    id: RecipeId,
) -> Result<RecipeDetail, FetchError> {
    get_recipe_detail_with_policy(recipes, videos, id, QuotaPolicy::Fail).await
}

/// Like [`get_recipe_detail`], but under [`QuotaPolicy::SampleRecipes`] an
/// exhausted recipe quota is answered with the matching sample recipe or a
/// placeholder, so recipes offered by a fallback search can still be opened.
pub async fn get_recipe_detail_with_policy(
    recipes: &dyn RecipeApi,
    videos: &dyn VideoApi,
    id: RecipeId,
    policy: QuotaPolicy,
) -> Result<RecipeDetail, FetchError> {
    debug!(id, "Loading recipe detail");
    let recipe = recipe_information_with_policy(recipes, id, policy).await?;

    let video = match videos
        .search_videos(&video_query(&recipe.title), VIDEO_CANDIDATES)
        .await
    {
        Ok(found) => found.into_iter().next(),
        Err(e) => {
            warn!(id, error = %e, "Video lookup failed");
            None
        }
    };

    Ok(RecipeDetail { recipe, video })
}
