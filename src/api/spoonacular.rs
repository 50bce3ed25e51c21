use super::{ApiError, IngredientQuery, NameQuery, RecipeApi};
use crate::model::{Recipe, RecipeId};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "Spoonacular";

/// Connection settings for the Spoonacular recipe API.
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    pub api_key: String,
    /// Base URL without a trailing path, e.g. `https://api.spoonacular.com`
    pub base_url: String,
}

impl SpoonacularConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.spoonacular.com";

    pub fn new(api_key: impl Into<String>) -> Self {
        SpoonacularConfig {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// `complexSearch` wraps its records in an envelope.
#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    results: Vec<Recipe>,
}

/// HTTP client for the Spoonacular recipe endpoints.
pub struct SpoonacularClient {
    config: SpoonacularConfig,
    client: Client,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Uses an existing `reqwest` client, sharing its connection pool.
    pub fn with_client(config: SpoonacularConfig, client: Client) -> Self {
        SpoonacularClient { config, client }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        debug!(url, "Requesting recipe data");

        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                service: SERVICE,
                source,
            })?;

        ApiError::check_status(SERVICE, response.status().as_u16())?;

        response.json().await.map_err(|e| ApiError::Decode {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

fn name_query_params(query: &NameQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.query.clone()),
        ("number", query.number.to_string()),
        ("addRecipeInformation", query.add_recipe_information.to_string()),
        ("fillIngredients", query.fill_ingredients.to_string()),
    ];
    if let Some(diet) = query.diet.as_ref().filter(|d| !d.is_empty()) {
        params.push(("diet", diet.clone()));
    }
    params
}

fn ingredient_query_params(query: &IngredientQuery) -> Vec<(&'static str, String)> {
    vec![
        ("ingredients", query.ingredients.clone()),
        ("number", query.number.to_string()),
        ("ranking", query.ranking.to_string()),
        ("ignorePantry", query.ignore_pantry.to_string()),
    ]
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn search_by_name(&self, query: &NameQuery) -> Result<Vec<Recipe>, ApiError> {
        let url = self.endpoint("recipes/complexSearch");
        let response: ComplexSearchResponse =
            self.get_json(&url, &name_query_params(query)).await?;
        Ok(response.results)
    }

    async fn search_by_ingredients(
        &self,
        query: &IngredientQuery,
    ) -> Result<Vec<Recipe>, ApiError> {
        let url = self.endpoint("recipes/findByIngredients");
        self.get_json(&url, &ingredient_query_params(query)).await
    }

    async fn recipe_information(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        let url = self.endpoint(&format!("recipes/{id}/information"));
        self.get_json(&url, &[("includeNutrition", "false".to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_name_query_params_with_diet() {
        let mut query = NameQuery::new("pasta carbonara");
        query.diet = Some("gluten free,dairy free".to_string());

        let params = name_query_params(&query);
        assert_eq!(
            params,
            vec![
                ("query", "pasta carbonara".to_string()),
                ("number", "12".to_string()),
                ("addRecipeInformation", "true".to_string()),
                ("fillIngredients", "true".to_string()),
                ("diet", "gluten free,dairy free".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_query_params_omit_empty_diet() {
        let mut query = NameQuery::new("soup");
        query.diet = Some(String::new());
        let params = name_query_params(&query);
        assert!(params.iter().all(|(key, _)| *key != "diet"));
    }

    #[test]
    fn test_ingredient_query_params() {
        let params = ingredient_query_params(&IngredientQuery::new("chicken, onion, garlic"));
        assert_eq!(
            params,
            vec![
                ("ingredients", "chicken, onion, garlic".to_string()),
                ("number", "12".to_string()),
                ("ranking", "1".to_string()),
                ("ignorePantry", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = SpoonacularConfig::new("key");
        config.base_url = "http://localhost:8080/".to_string();
        let client = SpoonacularClient::new(config);
        assert_eq!(
            client.endpoint("recipes/42/information"),
            "http://localhost:8080/recipes/42/information"
        );
    }

    #[test]
    fn test_decode_complex_search_envelope() {
        let json = indoc! {r#"
            {
                "results": [
                    {"id": 1, "title": "Carbonara", "glutenFree": false, "readyInMinutes": 25},
                    {"id": 2, "title": "Cacio e Pepe", "vegetarian": true}
                ],
                "offset": 0,
                "number": 12,
                "totalResults": 2
            }"#};
        let response: ComplexSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].ready_in_minutes, Some(25));
        assert_eq!(response.results[1].vegetarian, Some(true));
    }
}
