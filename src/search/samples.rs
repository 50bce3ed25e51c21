use crate::model::{Recipe, RecipeId};

const IMAGE_BASE: &str = "https://spoonacular.com/recipeImages";

fn sample(
    id: u64,
    title: &str,
    flags: [bool; 4],
    ready_in_minutes: u32,
    servings: u32,
) -> Recipe {
    let mut recipe = Recipe::new(id, title);
    recipe.image = Some(format!("{IMAGE_BASE}/{id}-312x231.jpg"));
    recipe.vegetarian = Some(flags[0]);
    recipe.vegan = Some(flags[1]);
    recipe.gluten_free = Some(flags[2]);
    recipe.dairy_free = Some(flags[3]);
    recipe.ready_in_minutes = Some(ready_in_minutes);
    recipe.servings = Some(servings);
    recipe
}

/// Offline recipes used when the provider's quota is exhausted and the
/// caller opted into [`QuotaPolicy::SampleRecipes`](super::QuotaPolicy).
pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        sample(654959, "Pasta With Tuna", [false, false, false, true], 45, 4),
        sample(511728, "Pasta Margherita", [true, false, false, false], 30, 4),
        sample(654812, "Pasta and Seafood", [false, false, false, false], 45, 2),
    ]
}

/// Stand-in for one record the provider refused to look up: the sample with
/// `id` if there is one, otherwise a placeholder whose dietary flags are all
/// false, so it fails every active filter.
pub fn fallback_recipe(id: RecipeId) -> Recipe {
    if let Some(recipe) = sample_recipes().into_iter().find(|r| r.id == id) {
        return recipe;
    }
    let mut recipe = sample(id, "Recipe Information Unavailable", [false; 4], 30, 4);
    recipe.image = Some(format!("{IMAGE_BASE}/placeholder.jpg"));
    recipe.summary = Some(
        "Detailed recipe information is currently unavailable due to API limitations."
            .to_string(),
    );
    recipe.instructions =
        Some("Please try again later to view the full recipe instructions.".to_string());
    recipe
}
