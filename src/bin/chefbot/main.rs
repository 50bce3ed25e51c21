//! chefbot: find recipes from the terminal.
//!
//! Usage:
//! ```bash
//! # Search by name, only vegetarian results
//! chefbot search pasta --vegetarian
//!
//! # Search by ingredients on hand
//! chefbot search "chicken, onion, garlic" --ingredients --gluten-free
//!
//! # Show a recipe with its cooking video and save it
//! chefbot show 654959 --save
//!
//! # Saved recipes need a signed-in user
//! chefbot login cook@example.com secret
//! chefbot saved list --filter pasta
//! chefbot saved remove 654959
//! ```

mod render;

use anyhow::{bail, Context, Result};
use chefbot::api::{SpoonacularClient, YoutubeClient};
use chefbot::config::{data_dir_from_env, ChefbotConfig};
use chefbot::favorites::{FavoritesStore, FileStorage};
use chefbot::logging::LoggingConfig;
use chefbot::session::{Access, Identity, LocalAuthProvider, Session};
use chefbot::{
    get_recipe_detail_with_policy, search_with_policy, DietaryFilterSet, RecipeId, SearchParams,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "chefbot",
    version,
    about = "Find recipes by name or by the ingredients you have"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Args, Debug, Default)]
struct DietArgs {
    #[arg(long)]
    vegetarian: bool,
    #[arg(long)]
    vegan: bool,
    #[arg(long)]
    gluten_free: bool,
    #[arg(long)]
    dairy_free: bool,
}

impl From<&DietArgs> for DietaryFilterSet {
    fn from(args: &DietArgs) -> Self {
        DietaryFilterSet {
            vegetarian: args.vegetarian,
            vegan: args.vegan,
            gluten_free: args.gluten_free,
            dairy_free: args.dairy_free,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Search recipes by name, or by ingredients with --ingredients
    Search {
        /// Recipe name, or a comma-separated ingredient list
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Treat the query as ingredients on hand
        #[arg(long)]
        ingredients: bool,

        #[command(flatten)]
        diet: DietArgs,
    },

    /// Show a recipe with ingredients, steps and a cooking video
    Show {
        id: RecipeId,

        /// Also save the recipe (requires login)
        #[arg(long)]
        save: bool,
    },

    /// Saved recipes (requires login)
    Saved {
        #[command(subcommand)]
        action: SavedCommand,
    },

    /// Sign in on this device
    Login { email: String, password: String },

    /// Sign out on this device
    Logout,

    /// Print the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum SavedCommand {
    /// List saved recipes
    List {
        /// Only titles containing this term
        #[arg(long)]
        filter: Option<String>,

        #[command(flatten)]
        diet: DietArgs,
    },

    /// Remove a saved recipe
    Remove { id: RecipeId },
}

type LocalSession = Session<LocalAuthProvider<FileStorage>>;

fn open_session(storage: FileStorage) -> LocalSession {
    let session = Session::new(LocalAuthProvider::new(storage));
    session.restore();
    session
}

/// Returns the signed-in user, or fails with the login redirect.
fn require_login(session: &LocalSession) -> Result<Identity> {
    match session.gate().guard() {
        Access::Granted(identity) => Ok(identity),
        Access::Redirect { to } => {
            bail!("Please log in first (redirecting to {to}): chefbot login <email> <password>")
        }
    }
}

async fn run_search(query: Vec<String>, ingredients: bool, diet: &DietArgs) -> Result<()> {
    let config = ChefbotConfig::from_env().context("Failed to load configuration")?;
    let client = SpoonacularClient::new(config.spoonacular());

    let query = query.join(" ");
    let params = if ingredients {
        SearchParams::by_ingredients(query)
    } else {
        SearchParams::by_name(query)
    }
    .with_filters(diet.into());

    let results = match search_with_policy(&client, &params, config.quota_policy()).await {
        Ok(results) => results,
        Err(e) if e.is_quota_exceeded() => {
            bail!("Recipe quota exceeded for today. Set CHEFBOT_QUOTA_FALLBACK=1 to browse sample recipes.")
        }
        Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
        println!("No recipes found");
    }
    for recipe in &results {
        render::print_summary(recipe);
    }
    Ok(())
}

async fn run_show(id: RecipeId, save: bool) -> Result<()> {
    let config = ChefbotConfig::from_env().context("Failed to load configuration")?;
    let recipes = SpoonacularClient::new(config.spoonacular());
    let videos = YoutubeClient::new(config.youtube());

    let detail =
        get_recipe_detail_with_policy(&recipes, &videos, id, config.quota_policy()).await?;
    render::print_detail(&detail);

    if save {
        let session = open_session(config.storage());
        require_login(&session)?;
        let store = FavoritesStore::new(config.storage());
        println!("{}", store.save(&detail.recipe)?.message());
    }
    Ok(())
}

fn run_saved(action: SavedCommand, storage: FileStorage) -> Result<()> {
    let session = open_session(storage.clone());
    let identity = require_login(&session)?;
    debug!(email = %identity.email, "Opening saved recipes");

    let store = FavoritesStore::new(storage);
    match action {
        SavedCommand::List { filter, diet } => {
            let saved = store.filtered(filter.as_deref().unwrap_or(""), &(&diet).into());
            if saved.is_empty() {
                println!("No saved recipes");
            }
            for recipe in &saved {
                render::print_summary(recipe);
            }
        }
        SavedCommand::Remove { id } => {
            store.remove(id)?;
            println!("Recipe removed");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "chefbot=debug".to_string();
    }
    logging.init()?;

    match cli.command {
        Command::Search {
            query,
            ingredients,
            diet,
        } => run_search(query, ingredients, &diet).await,
        Command::Show { id, save } => run_show(id, save).await,
        Command::Saved { action } => run_saved(action, FileStorage::new(data_dir_from_env()?)),
        Command::Login { email, password } => {
            let session = open_session(FileStorage::new(data_dir_from_env()?));
            let identity = session.login(&email, &password)?;
            println!("Signed in as {}", identity.email);
            Ok(())
        }
        Command::Logout => {
            let session = open_session(FileStorage::new(data_dir_from_env()?));
            session.logout()?;
            println!("Signed out");
            Ok(())
        }
        Command::Whoami => {
            let session = open_session(FileStorage::new(data_dir_from_env()?));
            match session.gate().state().identity() {
                Some(identity) => println!("{}", identity.email),
                None => println!("Not signed in"),
            }
            Ok(())
        }
    }
}
