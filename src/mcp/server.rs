//! Calculator MCP Server Implementation
//!
//! Exposes the recipe form and nutrition calculation as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::nutrition::Aggregator;
use crate::tools::calculator::{self, CalculatorSession};
use crate::tools::status::StatusTracker;

/// Recipe Nutrition Calculator MCP Service
#[derive(Clone)]
pub struct CalculatorService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<Mutex<CalculatorSession>>,
    aggregator: Aggregator,
    tool_router: ToolRouter<CalculatorService>,
}

impl CalculatorService {
    pub fn new(aggregator: Aggregator, status_tracker: StatusTracker) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(status_tracker)),
            session: Arc::new(Mutex::new(CalculatorSession::new())),
            aggregator,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Form Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddIngredientParams {
    /// Ingredient name, e.g. "chicken breast" (optional, can be set later)
    pub name: Option<String>,
    /// Percentage of the total batch weight as text, e.g. "25" (optional)
    pub percentage: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveIngredientParams {
    /// Zero-based row index
    pub index: usize,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIngredientNameParams {
    /// Zero-based row index
    pub index: usize,
    /// New ingredient name
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIngredientPercentageParams {
    /// Zero-based row index
    pub index: usize,
    /// Percentage as text; empty string clears it
    pub percentage: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetTotalWeightParams {
    /// Total batch weight in grams
    pub grams: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetIgnoreRemainingParams {
    /// Allow percentages that add up to less than 100%
    pub ignore: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CalculatorService {
    // --- Status ---

    #[tool(description = "Get the current status of the calculator including build info, lookup API configuration, and calculation counts")]
    async fn calculator_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get step-by-step instructions for building a recipe and calculating its nutrition facts. Call this first when unsure how to use the calculator tools.")]
    fn calculator_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CALCULATOR_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CALCULATOR_INSTRUCTIONS)]))
    }

    // --- Form ---

    #[tool(description = "Show the recipe form: ingredient rows, total weight, ignore-remaining flag, and percentage totals")]
    async fn get_form(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        to_json(&calculator::get_form(&session))
    }

    #[tool(description = "Append an ingredient row, optionally with a name and percentage")]
    async fn add_ingredient(&self, Parameters(p): Parameters<AddIngredientParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = calculator::add_ingredient(&mut session, p.name.as_deref(), p.percentage.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove the ingredient row at an index. Missing rows are ignored.")]
    async fn remove_ingredient(&self, Parameters(p): Parameters<RemoveIngredientParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&calculator::remove_ingredient(&mut session, p.index))
    }

    #[tool(description = "Rename the ingredient row at an index")]
    async fn update_ingredient_name(&self, Parameters(p): Parameters<UpdateIngredientNameParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&calculator::update_ingredient_name(&mut session, p.index, &p.name))
    }

    #[tool(description = "Set the percentage of the ingredient row at an index. An empty string clears it.")]
    async fn update_ingredient_percentage(&self, Parameters(p): Parameters<UpdateIngredientPercentageParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = calculator::update_ingredient_percentage(&mut session, p.index, &p.percentage)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Set the total batch weight in grams. This is also the serving size on the label.")]
    async fn set_total_weight(&self, Parameters(p): Parameters<SetTotalWeightParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = calculator::set_total_weight(&mut session, p.grams)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Allow calculating when percentages add up to less than 100%")]
    async fn set_ignore_remaining(&self, Parameters(p): Parameters<SetIgnoreRemainingParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&calculator::set_ignore_remaining(&mut session, p.ignore))
    }

    #[tool(description = "Clear the form back to one blank row and 100 g total, and forget the last result")]
    async fn reset_form(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        to_json(&calculator::reset_form(&mut session))
    }

    // --- Calculation ---

    #[tool(description = "Validate the form, look up every ingredient's nutrition at its computed weight, and return the summed nutrition facts")]
    async fn calculate_nutrition(&self) -> Result<CallToolResult, McpError> {
        // Lookups run without holding the session lock
        let form = self.session.lock().await.form.clone();
        let outcome = calculator::calculate(&self.aggregator, &form).await;

        self.status_tracker.lock().await.record_calculation(outcome.is_ok());

        match outcome {
            Ok(result) => {
                let response = to_json(&result);
                self.session.lock().await.last_result = Some(result);
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "Calculation failed");
                to_json(&serde_json::json!({ "error": e.user_message() }))
            }
        }
    }

    #[tool(description = "Get the nutrition facts from the last successful calculation")]
    async fn get_nutrition_facts(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        match &session.last_result {
            Some(result) => to_json(result),
            None => to_json(&serde_json::json!({ "error": "No calculation has been run yet" })),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CalculatorService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipe-nutrition".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Nutrition Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Nutrition Calculator - nutrition facts for a recipe given as ingredient percentages. \
                 IMPORTANT: Call calculator_instructions before first use. \
                 Form: get_form, add_ingredient, remove_ingredient, update_ingredient_name, \
                 update_ingredient_percentage, set_total_weight, set_ignore_remaining, reset_form. \
                 Results: calculate_nutrition, get_nutrition_facts. \
                 Status: calculator_status."
                    .into(),
            ),
        }
    }
}
