//! Recipe Nutrition Calculator
//!
//! An MCP server that turns ingredient percentages into a nutrition facts label.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use recipe_nutrition::build_info;
use recipe_nutrition::config::NutritionixConfig;
use recipe_nutrition::mcp::CalculatorService;
use recipe_nutrition::nutrition::{Aggregator, NutritionixClient};
use recipe_nutrition::tools::status::StatusTracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("recipe_nutrition=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = NutritionixConfig::from_env();
    eprintln!("Nutrition API endpoint: {}", config.endpoint);
    if !config.has_credentials() {
        tracing::warn!("NUTRITIONIX_APP_ID / NUTRITIONIX_APP_KEY not set; lookups will be rejected by the API");
    }

    let status_tracker = StatusTracker::new(&config);
    let aggregator = Aggregator::new(NutritionixClient::new(config));
    let service = CalculatorService::new(aggregator, status_tracker);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
