//! Recording fakes for the external services.

use crate::api::{ApiError, IngredientQuery, NameQuery, RecipeApi, VideoApi};
use crate::model::{Recipe, RecipeId, Video};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ByName(NameQuery),
    ByIngredients(IngredientQuery),
    Information(RecipeId),
}

/// Canned recipe service that records every request it receives.
#[derive(Default)]
pub struct FakeRecipeApi {
    pub name_results: Vec<Recipe>,
    pub ingredient_results: Vec<Recipe>,
    pub details: HashMap<RecipeId, Recipe>,
    /// Status code returned by every search endpoint instead of results
    pub search_status: Option<u16>,
    /// Status code returned by the detail endpoint instead of a record
    pub detail_status: Option<u16>,
    /// Status code returned by the detail endpoint for one id only
    pub detail_statuses: HashMap<RecipeId, u16>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeRecipeApi {
    pub fn with_detail(mut self, recipe: Recipe) -> Self {
        self.details.insert(recipe.id, recipe);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn detail_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Information(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail_with(status: Option<u16>) -> Result<(), ApiError> {
        match status {
            Some(status) => ApiError::check_status("Fake", status),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecipeApi for FakeRecipeApi {
    async fn search_by_name(&self, query: &NameQuery) -> Result<Vec<Recipe>, ApiError> {
        self.record(Call::ByName(query.clone()));
        Self::fail_with(self.search_status)?;
        Ok(self.name_results.clone())
    }

    async fn search_by_ingredients(
        &self,
        query: &IngredientQuery,
    ) -> Result<Vec<Recipe>, ApiError> {
        self.record(Call::ByIngredients(query.clone()));
        Self::fail_with(self.search_status)?;
        Ok(self.ingredient_results.clone())
    }

    async fn recipe_information(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        self.record(Call::Information(id));
        Self::fail_with(self.detail_status)?;
        Self::fail_with(self.detail_statuses.get(&id).copied())?;
        self.details.get(&id).cloned().ok_or(ApiError::Status {
            service: "Fake",
            status: 404,
        })
    }
}

/// Canned video service.
#[derive(Default)]
pub struct FakeVideoApi {
    pub videos: Vec<Video>,
    pub status: Option<u16>,
    pub queries: Mutex<Vec<(String, u32)>>,
}

impl FakeVideoApi {
    pub fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoApi for FakeVideoApi {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>, ApiError> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        if let Some(status) = self.status {
            ApiError::check_status("Fake", status)?;
        }
        Ok(self.videos.clone())
    }
}

pub fn summary(id: RecipeId, title: &str) -> Recipe {
    let mut recipe = Recipe::new(id, title);
    recipe.used_ingredient_count = Some(2);
    recipe.missed_ingredient_count = Some(1);
    recipe
}

pub fn detail(id: RecipeId, title: &str, vegan: bool) -> Recipe {
    let mut recipe = Recipe::new(id, title);
    recipe.vegetarian = Some(vegan);
    recipe.vegan = Some(vegan);
    recipe.gluten_free = Some(true);
    recipe.dairy_free = Some(vegan);
    recipe.ready_in_minutes = Some(30);
    recipe.summary = Some("<b>Tasty</b>".to_string());
    recipe
}

pub fn video(id: &str, title: &str) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        channel: "Test Kitchen".to_string(),
        published_at: Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap(),
    }
}
