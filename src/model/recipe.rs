use crate::filter::DietaryFlag;
use crate::text::strip_html;
use serde::{Deserialize, Serialize};

/// Provider-assigned recipe identifier.
pub type RecipeId = u64;

/// A single measurement of an ingredient in one unit system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit_short: String,
    #[serde(default)]
    pub unit_long: String,
}

/// US and metric breakdown of an ingredient amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Measures {
    #[serde(default)]
    pub us: Measure,
    #[serde(default)]
    pub metric: Measure,
}

/// An ingredient as returned by the recipe detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub measures: Measures,
}

impl Ingredient {
    /// Shopping-list style line in US units, e.g. `"2 tbsp olive oil"`.
    pub fn display_line(&self) -> String {
        let amount = format_amount(self.measures.us.amount);
        let unit = self.measures.us.unit_short.trim();
        if unit.is_empty() {
            format!("{} {}", amount, self.name)
        } else {
            format!("{} {} {}", amount, unit, self.name)
        }
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        let rounded = (amount * 100.0).round() / 100.0;
        format!("{rounded}")
    }
}

/// One numbered step of a recipe's instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: u32,
    pub step: String,
}

/// A named group of steps. Most recipes have a single unnamed group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InstructionSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A recipe record in the provider's wire shape.
///
/// List responses only fill the summary fields; the long-form fields and,
/// for ingredient matches, the dietary flags are present only after a
/// detail fetch. The same shape is used for saved snapshots.
///
/// # Examples
///
/// ```
/// use chefbot::Recipe;
///
/// let recipe: Recipe = serde_json::from_str(
///     r#"{"id": 654959, "title": "Pasta With Tuna", "dairyFree": true}"#,
/// )?;
/// assert_eq!(recipe.dairy_free, Some(true));
/// assert_eq!(recipe.vegan, None);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegetarian: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vegan: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gluten_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dairy_free: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,

    /// HTML summary, only after a detail fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_ingredients: Option<Vec<Ingredient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_instructions: Option<Vec<InstructionSet>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_types: Option<Vec<String>>,

    /// Ingredient-match only: how many of the queried ingredients are used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_ingredient_count: Option<u32>,
    /// Ingredient-match only: how many further ingredients are needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed_ingredient_count: Option<u32>,
}

impl Recipe {
    /// Creates a bare summary record with no optional fields set.
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Recipe {
            id,
            title: title.into(),
            image: None,
            vegetarian: None,
            vegan: None,
            gluten_free: None,
            dairy_free: None,
            ready_in_minutes: None,
            servings: None,
            summary: None,
            instructions: None,
            extended_ingredients: None,
            analyzed_instructions: None,
            source_url: None,
            dish_types: None,
            used_ingredient_count: None,
            missed_ingredient_count: None,
        }
    }

    /// Returns the value of one dietary flag, `None` when the record never
    /// carried it.
    pub fn flag(&self, flag: DietaryFlag) -> Option<bool> {
        match flag {
            DietaryFlag::Vegetarian => self.vegetarian,
            DietaryFlag::Vegan => self.vegan,
            DietaryFlag::GlutenFree => self.gluten_free,
            DietaryFlag::DairyFree => self.dairy_free,
        }
    }

    /// Overlays a detail record onto this summary record.
    ///
    /// Every field present on `detail` wins; fields only the summary carries
    /// (such as the ingredient match counts) are kept.
    pub fn merge_detail(self, detail: Recipe) -> Recipe {
        Recipe {
            id: detail.id,
            title: detail.title,
            image: detail.image.or(self.image),
            vegetarian: detail.vegetarian.or(self.vegetarian),
            vegan: detail.vegan.or(self.vegan),
            gluten_free: detail.gluten_free.or(self.gluten_free),
            dairy_free: detail.dairy_free.or(self.dairy_free),
            ready_in_minutes: detail.ready_in_minutes.or(self.ready_in_minutes),
            servings: detail.servings.or(self.servings),
            summary: detail.summary.or(self.summary),
            instructions: detail.instructions.or(self.instructions),
            extended_ingredients: detail.extended_ingredients.or(self.extended_ingredients),
            analyzed_instructions: detail.analyzed_instructions.or(self.analyzed_instructions),
            source_url: detail.source_url.or(self.source_url),
            dish_types: detail.dish_types.or(self.dish_types),
            used_ingredient_count: detail.used_ingredient_count.or(self.used_ingredient_count),
            missed_ingredient_count: detail
                .missed_ingredient_count
                .or(self.missed_ingredient_count),
        }
    }

    /// Plain-text summary with markup removed.
    pub fn summary_text(&self) -> Option<String> {
        self.summary
            .as_deref()
            .map(strip_html)
            .filter(|s| !s.is_empty())
    }

    /// Display lines for every ingredient, in US units.
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.extended_ingredients
            .iter()
            .flatten()
            .map(Ingredient::display_line)
            .collect()
    }

    /// Steps of the first instruction group.
    pub fn steps(&self) -> &[Step] {
        self.analyzed_instructions
            .as_ref()
            .and_then(|sets| sets.first())
            .map(|set| set.steps.as_slice())
            .unwrap_or(&[])
    }

    /// Labels of the dietary flags that are known to hold.
    pub fn badges(&self) -> Vec<&'static str> {
        DietaryFlag::ALL
            .iter()
            .filter(|flag| self.flag(**flag) == Some(true))
            .map(|flag| flag.label())
            .collect()
    }

    /// Ingredient match summary, e.g. `"3 ingredients matched, 2 needed"`.
    pub fn match_summary(&self) -> Option<String> {
        match (self.used_ingredient_count, self.missed_ingredient_count) {
            (Some(used), Some(missed)) => {
                Some(format!("{used} ingredients matched, {missed} needed"))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const DETAIL_JSON: &str = indoc! {r#"
        {
            "id": 716429,
            "title": "Pasta with Garlic, Scallions, Cauliflower & Breadcrumbs",
            "image": "https://img.spoonacular.com/recipes/716429-556x370.jpg",
            "vegetarian": true,
            "vegan": false,
            "glutenFree": false,
            "dairyFree": false,
            "readyInMinutes": 45,
            "servings": 2,
            "sourceUrl": "https://fullbellysisters.blogspot.com/2012/06/pasta.html",
            "summary": "You can never have too many <b>main course</b> recipes &amp; more.",
            "dishTypes": ["lunch", "main course", "dinner"],
            "extendedIngredients": [
                {
                    "id": 1001,
                    "name": "butter",
                    "original": "1 tbsp butter",
                    "amount": 1.0,
                    "unit": "tbsp",
                    "measures": {
                        "us": {"amount": 1.0, "unitShort": "Tbsp", "unitLong": "Tbsp"},
                        "metric": {"amount": 1.0, "unitShort": "Tbsp", "unitLong": "Tbsp"}
                    }
                },
                {
                    "id": 10011135,
                    "name": "cauliflower florets",
                    "amount": 2.0,
                    "unit": "cups",
                    "measures": {
                        "us": {"amount": 2.5, "unitShort": "cups", "unitLong": "cups"},
                        "metric": {"amount": 250.0, "unitShort": "ml", "unitLong": "milliliters"}
                    }
                }
            ],
            "analyzedInstructions": [
                {
                    "name": "",
                    "steps": [
                        {"number": 1, "step": "Melt the butter."},
                        {"number": 2, "step": "Toss in the cauliflower."}
                    ]
                }
            ],
            "pricePerServing": 163.15
        }"#};

    #[test]
    fn test_deserialize_detail() {
        let recipe: Recipe = serde_json::from_str(DETAIL_JSON).unwrap();
        assert_eq!(recipe.id, 716429);
        assert_eq!(recipe.vegetarian, Some(true));
        assert_eq!(recipe.vegan, Some(false));
        assert_eq!(recipe.ready_in_minutes, Some(45));
        assert_eq!(recipe.extended_ingredients.as_ref().unwrap().len(), 2);
        assert_eq!(recipe.steps().len(), 2);
        assert_eq!(recipe.steps()[1].number, 2);
    }

    #[test]
    fn test_deserialize_ingredient_match_summary() {
        let json = indoc! {r#"
            {
                "id": 641803,
                "title": "Easy & Delish! ~ Apple Crumble ~",
                "image": "https://img.spoonacular.com/recipes/641803-312x231.jpg",
                "imageType": "jpg",
                "usedIngredientCount": 3,
                "missedIngredientCount": 4,
                "likes": 1
            }"#};
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.vegan, None);
        assert_eq!(recipe.ready_in_minutes, None);
        assert_eq!(
            recipe.match_summary().unwrap(),
            "3 ingredients matched, 4 needed"
        );
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let recipe = Recipe::new(1, "Toast");
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "title": "Toast"}));
    }

    #[test]
    fn test_merge_detail_prefers_detail_fields() {
        let mut summary = Recipe::new(7, "Chicken Stir Fry");
        summary.image = Some("summary.jpg".to_string());
        summary.used_ingredient_count = Some(3);
        summary.missed_ingredient_count = Some(1);

        let mut detail = Recipe::new(7, "Chicken Stir-Fry");
        detail.vegan = Some(false);
        detail.gluten_free = Some(true);
        detail.servings = Some(4);

        let merged = summary.merge_detail(detail);
        assert_eq!(merged.title, "Chicken Stir-Fry");
        assert_eq!(merged.image.as_deref(), Some("summary.jpg"));
        assert_eq!(merged.gluten_free, Some(true));
        assert_eq!(merged.servings, Some(4));
        assert_eq!(merged.used_ingredient_count, Some(3));
        assert_eq!(merged.missed_ingredient_count, Some(1));
    }

    #[test]
    fn test_presentation_helpers() {
        let recipe: Recipe = serde_json::from_str(DETAIL_JSON).unwrap();
        assert_eq!(
            recipe.summary_text().unwrap(),
            "You can never have too many main course recipes & more."
        );
        assert_eq!(
            recipe.ingredient_lines(),
            vec!["1 Tbsp butter", "2.5 cups cauliflower florets"]
        );
        assert_eq!(recipe.badges(), vec!["Vegetarian"]);
        assert!(recipe.match_summary().is_none());
    }

    #[test]
    fn test_steps_empty_without_instructions() {
        let recipe = Recipe::new(3, "Water");
        assert!(recipe.steps().is_empty());
        assert!(recipe.ingredient_lines().is_empty());
        assert!(recipe.summary_text().is_none());
    }

    #[test]
    fn test_ingredient_display_without_unit() {
        let ingredient = Ingredient {
            id: None,
            name: "eggs".to_string(),
            original: None,
            amount: 2.0,
            unit: String::new(),
            measures: Measures {
                us: Measure {
                    amount: 2.0,
                    unit_short: String::new(),
                    unit_long: String::new(),
                },
                metric: Measure::default(),
            },
        };
        assert_eq!(ingredient.display_line(), "2 eggs");
    }
}
