//! MCP server implementation

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler, ServiceExt};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result as ToolResult;
use crate::tools::{
    CookingTechniqueParams, CookingTools, IngredientSubstituteParams, MealPlanParams,
    NutritionCalculatorParams, RecipeDetailParams, RecipeSearchParams, TimerCalculatorParams,
    UnitConversionParams,
};
use crate::types::{Cuisine, DietaryTag};

/// MCP server exposing the cooking tools
#[derive(Clone)]
pub struct CookingServer {
    pub tools: Arc<CookingTools>,
    tool_router: ToolRouter<Self>,
}

/// Tool results go back to the agent as pretty JSON, failures as "Error: ..." text
fn render<T: Serialize>(result: ToolResult<T>) -> String {
    match result {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("Error: {}", e)),
        Err(e) => {
            tracing::warn!(error = %e, "MCP tool call failed");
            format!("Error: {}", e)
        }
    }
}

#[tool_router]
impl CookingServer {
    pub fn new(tools: Arc<CookingTools>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search for recipes by name, cuisine, difficulty, dietary requirements, ingredient or maximum cooking time")]
    async fn recipe_search(&self, Parameters(params): Parameters<RecipeSearchParams>) -> String {
        render(self.tools.recipe_search(params))
    }

    #[tool(description = "Get the full recipe with ingredients and step-by-step instructions. Accepts an ID or part of a recipe name.")]
    async fn recipe_detail(&self, Parameters(params): Parameters<RecipeDetailParams>) -> String {
        render(self.tools.recipe_detail(params))
    }

    #[tool(description = "Find substitutes for a specific ingredient")]
    async fn ingredient_substitute(
        &self,
        Parameters(params): Parameters<IngredientSubstituteParams>,
    ) -> String {
        render(self.tools.ingredient_substitute(params))
    }

    #[tool(description = "Get information about cooking techniques like saute, braise, roast, stir-fry and poach")]
    async fn cooking_technique(&self, Parameters(params): Parameters<CookingTechniqueParams>) -> String {
        render(self.tools.cooking_technique(params))
    }

    #[tool(description = "Generate a meal plan for multiple days with recipe suggestions")]
    async fn meal_plan(&self, Parameters(params): Parameters<MealPlanParams>) -> String {
        render(self.tools.meal_plan(params))
    }

    #[tool(description = "Convert between cooking measurements (cups, tbsp, tsp, ml, g, oz, lb, celsius, fahrenheit)")]
    async fn unit_conversion(&self, Parameters(params): Parameters<UnitConversionParams>) -> String {
        render(self.tools.unit_conversion(params))
    }

    #[tool(description = "Calculate nutritional information for a recipe and number of servings")]
    async fn nutrition_calculator(
        &self,
        Parameters(params): Parameters<NutritionCalculatorParams>,
    ) -> String {
        render(self.tools.nutrition_calculator(params))
    }

    #[tool(description = "Get recommended cooking times for different foods and methods")]
    async fn timer_calculator(&self, Parameters(params): Parameters<TimerCalculatorParams>) -> String {
        render(self.tools.timer_calculator(params))
    }

    /// Catalog statistics
    #[tool(description = "Get statistics about the recipe catalog and the accepted cuisines and dietary tags")]
    async fn get_catalog_stats(&self) -> String {
        let store = self.tools.store();
        let cuisines: Vec<&str> = Cuisine::ALL.iter().map(|c| c.as_str()).collect();
        let tags: Vec<&str> = DietaryTag::ALL.iter().map(|t| t.as_str()).collect();

        format!(
            "# Cooking Assistant Catalog\n\n\
            - **Recipes:** {}\n\
            - **Cuisines in use:** {}\n\
            - **Techniques:** {}\n\
            - **Pantry ingredients:** {}\n\
            - **Accepted cuisines:** {}\n\
            - **Accepted dietary tags:** {}\n",
            store.len(),
            store.cuisine_count(),
            store.techniques().len(),
            store.ingredients().len(),
            cuisines.join(", "),
            tags.join(", ")
        )
    }
}

#[tool_handler]
impl ServerHandler for CookingServer {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::default(),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: rmcp::model::Implementation {
                name: "cooking-assistant".into(),
                title: Some("Cooking Assistant".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some("Cooking assistant with a recipe catalog. Use recipe_search to find dishes, recipe_detail for full instructions, and the substitution, technique, conversion, nutrition, timing and meal_plan tools for kitchen questions.".into()),
        }
    }
}

/// Run the MCP server on stdio
pub async fn serve_stdio(server: CookingServer) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server on stdio...");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Run the MCP server on HTTP
pub async fn serve_http(server: CookingServer, port: u16) -> anyhow::Result<()> {
    use axum::routing::get;
    use axum::Router;
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    };
    use tokio_util::sync::CancellationToken;

    let tools = server.tools.clone();
    let ct = CancellationToken::new();

    let config = StreamableHttpServerConfig {
        cancellation_token: ct.clone(),
        ..Default::default()
    };

    let mcp_service = StreamableHttpService::new(
        move || Ok(CookingServer::new(tools.clone())),
        Arc::new(LocalSessionManager::default()),
        config,
    );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", mcp_service);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Cooking assistant MCP server running at http://{}/mcp", addr);
    tracing::info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down...");
            ct.cancel();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::store::RecipeStore;

    fn server() -> CookingServer {
        let store = Arc::new(RecipeStore::builtin().unwrap());
        CookingServer::new(Arc::new(CookingTools::new(store, &Config::default())))
    }

    #[test]
    fn test_router_lists_every_tool() {
        let tools = server().tool_router.list_all();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(names.len(), 9);
        for name in [
            "recipe_search",
            "recipe_detail",
            "ingredient_substitute",
            "unit_conversion",
            "cooking_technique",
            "meal_plan",
            "nutrition_calculator",
            "timer_calculator",
            "get_catalog_stats",
        ] {
            assert!(names.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_render_reports_errors_as_text() {
        let text = render::<u32>(Err(Error::RecipeNotFound("lasagna".into())));
        assert!(text.starts_with("Error:"), "{}", text);
        assert!(text.contains("lasagna"));

        assert_eq!(render(Ok(42u32)), "42");
    }
}
