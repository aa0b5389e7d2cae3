//! Print a nutrition facts label for a recipe file
//!
//! Usage: nutrition_facts <recipe.json>
//!
//! ```json
//! { "total_weight": 200, "ignore_remaining": false,
//!   "ingredients": [{ "name": "rice", "percentage": 60 }, { "name": "beans", "percentage": 40 }] }
//! ```

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use recipe_nutrition::config::NutritionixConfig;
use recipe_nutrition::form::{FormState, DEFAULT_TOTAL_WEIGHT};
use recipe_nutrition::models::IngredientEntry;
use recipe_nutrition::nutrition::{Aggregator, NutritionixClient};
use recipe_nutrition::tools::calculator::calculate;
use recipe_nutrition::tools::facts::format_amount;

#[derive(Debug, Deserialize)]
struct RecipeFile {
    #[serde(default = "default_total_weight")]
    total_weight: f64,
    #[serde(default)]
    ignore_remaining: bool,
    ingredients: Vec<IngredientEntry>,
}

fn default_total_weight() -> f64 {
    DEFAULT_TOTAL_WEIGHT
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipe_nutrition=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: nutrition_facts <recipe.json>")?;
    let recipe: RecipeFile = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    let form = FormState {
        ingredients: recipe.ingredients,
        total_weight: recipe.total_weight,
        ignore_remaining: recipe.ignore_remaining,
    };

    let aggregator = Aggregator::new(NutritionixClient::new(NutritionixConfig::from_env()));
    match calculate(&aggregator, &form).await {
        Ok(result) => {
            println!("{}", result.label);
            println!();
            for item in &result.breakdown {
                println!(
                    "{:>8}g  {:<24} {:>8} kcal",
                    format_amount(item.weight_grams),
                    item.name,
                    format_amount(item.nutrition.calories)
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
