use chefbot::{Recipe, RecipeDetail};

pub fn print_summary(recipe: &Recipe) {
    let mut line = format!("{:>8}  {}", recipe.id, recipe.title);
    if let Some(minutes) = recipe.ready_in_minutes {
        line.push_str(&format!("  ({minutes} min)"));
    }
    let badges = recipe.badges();
    if !badges.is_empty() {
        line.push_str(&format!("  [{}]", badges.join(", ")));
    }
    if let Some(matched) = recipe.match_summary() {
        line.push_str(&format!("  {matched}"));
    }
    println!("{line}");
}

pub fn print_detail(detail: &RecipeDetail) {
    let recipe = &detail.recipe;
    println!("{}", recipe.title);
    println!("{}", "=".repeat(recipe.title.chars().count()));

    let mut facts = Vec::new();
    if let Some(minutes) = recipe.ready_in_minutes {
        facts.push(format!("Ready in {minutes} minutes"));
    }
    if let Some(servings) = recipe.servings {
        facts.push(format!("Serves {servings}"));
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" | "));
    }
    let badges = recipe.badges();
    if !badges.is_empty() {
        println!("{}", badges.join(", "));
    }

    if let Some(summary) = recipe.summary_text() {
        println!("\n{summary}");
    }

    let ingredients = recipe.ingredient_lines();
    if !ingredients.is_empty() {
        println!("\nIngredients");
        for line in ingredients {
            println!("  - {line}");
        }
    }

    let steps = recipe.steps();
    if !steps.is_empty() {
        println!("\nInstructions");
        for step in steps {
            println!("  {}. {}", step.number, step.step);
        }
    }

    if let Some(url) = &recipe.source_url {
        println!("\nSource: {url}");
    }

    match &detail.video {
        Some(video) => {
            println!("\nVideo: {}", video.title);
            println!("  {}", video.caption());
            println!("  {}", video.embed_url());
        }
        None => println!("\nNo video found"),
    }
}
