//! API route definitions

use axum::{
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, ChatRequest, ChatResponse, CuisinesResponse, DietaryTagsResponse, DifficultiesResponse,
    ErrorResponse, HealthResponse, RecipeListResponse, SearchResponse, TechniqueListResponse,
    ToolListResponse,
};
use crate::agent::CookingAgent;
use crate::convert::{Conversion, ConversionKind, Quantity};
use crate::kitchen::{MealPlan, MealPlanDay, NutritionReport, PlannedRecipe, ScaledNutrition};
use crate::mcp::CookingServer;
use crate::tools::{CookingTools, ToolSpec};
use crate::types::{
    Cuisine, DietaryTag, Difficulty, Ingredient, NutritionInfo, Recipe, RecipeSummary, Technique,
};

/// Embedded frontend assets
#[derive(RustEmbed)]
#[folder = "frontend"]
struct Asset;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cooking Assistant API",
        version = "0.1.0",
        description = "Recipe catalog, kitchen tools and a chat assistant, with MCP integration"
    ),
    tags(
        (name = "chat", description = "Conversational assistant"),
        (name = "recipes", description = "Recipe catalog"),
        (name = "techniques", description = "Cooking techniques"),
        (name = "tools", description = "Kitchen tools"),
        (name = "metadata", description = "Cuisines, dietary tags and difficulty levels"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::chat,
        handlers::list_recipes,
        handlers::get_recipe,
        handlers::search_recipes,
        handlers::recipe_nutrition,
        handlers::list_techniques,
        handlers::get_technique,
        handlers::list_cuisines,
        handlers::list_dietary_tags,
        handlers::list_difficulties,
        handlers::convert,
        handlers::meal_plan,
        handlers::list_tools,
        handlers::invoke_tool,
    ),
    components(schemas(
        Recipe,
        RecipeSummary,
        Ingredient,
        NutritionInfo,
        Technique,
        Cuisine,
        DietaryTag,
        Difficulty,
        Conversion,
        ConversionKind,
        Quantity,
        MealPlan,
        MealPlanDay,
        PlannedRecipe,
        NutritionReport,
        ScaledNutrition,
        ToolSpec,
        ChatRequest,
        ChatResponse,
        RecipeListResponse,
        SearchResponse,
        TechniqueListResponse,
        CuisinesResponse,
        DietaryTagsResponse,
        DifficultiesResponse,
        ToolListResponse,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Static file handler for embedded frontend assets
/// Serves files from the embedded `frontend` directory with SPA routing support
async fn static_handler(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();
    if path.is_empty() {
        path = "index.html".to_string();
    }

    match Asset::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => {
            // SPA fallback: serve index.html for client-side routing
            match Asset::get("index.html") {
                Some(content) => {
                    let mime = mime_guess::from_path("index.html").first_or_octet_stream();
                    ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
                }
                None => (StatusCode::NOT_FOUND, "Frontend assets missing").into_response(),
            }
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<CookingTools>,
    pub agent: Arc<CookingAgent>,
}

impl AppState {
    pub fn new(tools: Arc<CookingTools>, agent: Arc<CookingAgent>) -> Self {
        Self { tools, agent }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/api/chat", post(handlers::chat))

        // Recipes
        .route("/api/recipes", get(handlers::list_recipes))
        .route("/api/recipes/search", get(handlers::search_recipes))
        .route("/api/recipes/{id}", get(handlers::get_recipe))
        .route("/api/recipes/{id}/nutrition", get(handlers::recipe_nutrition))

        // Techniques
        .route("/api/techniques", get(handlers::list_techniques))
        .route("/api/techniques/{id}", get(handlers::get_technique))

        // Metadata
        .route("/api/cuisines", get(handlers::list_cuisines))
        .route("/api/dietary-tags", get(handlers::list_dietary_tags))
        .route("/api/difficulties", get(handlers::list_difficulties))

        // Tools
        .route("/api/convert", post(handlers::convert))
        .route("/api/meal-plan", post(handlers::meal_plan))
        .route("/api/tools", get(handlers::list_tools))
        .route("/api/tools/{name}", post(handlers::invoke_tool))

        // Health
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    api_routes()
        // Static files (frontend)
        .fallback(static_handler)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the API router with MCP endpoint integrated
pub fn create_router_with_mcp(state: AppState) -> Router {
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    };

    let tools = state.tools.clone();

    let config = StreamableHttpServerConfig {
        cancellation_token: CancellationToken::new(),
        ..Default::default()
    };

    let mcp_service = StreamableHttpService::new(
        move || Ok(CookingServer::new(tools.clone())),
        Arc::new(LocalSessionManager::default()),
        config,
    );

    api_routes()
        // MCP endpoint
        .nest_service("/mcp", mcp_service)
        // Static files (frontend)
        .fallback(static_handler)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
