//! Recipe and video records shared by every other module.

mod recipe;
mod video;

pub use recipe::{Ingredient, InstructionSet, Measure, Measures, Recipe, RecipeId, Step};
pub use video::Video;
