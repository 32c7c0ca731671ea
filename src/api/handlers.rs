//! API request handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::routes::AppState;
use crate::convert::Conversion;
use crate::error::Error;
use crate::kitchen::{MealPlan, NutritionReport};
use crate::tools::{
    parse_input, CookingTechniqueParams, MealPlanParams, NutritionCalculatorParams,
    RecipeSearchParams, ToolSpec, UnitConversionParams,
};
use crate::types::{Cuisine, DietaryTag, Difficulty, Recipe, RecipeSummary, Technique};

// Query parameters

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeSearchQuery {
    /// Text matched against name, description and ingredients
    pub q: Option<String>,
    /// Cuisine (korean, italian, ...)
    pub cuisine: Option<String>,
    /// Difficulty (easy, medium, hard)
    pub difficulty: Option<String>,
    /// Maximum total time in minutes
    pub max_time_min: Option<String>,
    /// Alias of `max_time_min`
    pub max_time: Option<String>,
    /// Dietary tags that must all apply; repeatable, each value may be comma separated
    pub dietary_tags: Vec<String>,
    /// Alias of `dietary_tags`
    pub dietary: Vec<String>,
    /// Ingredient the recipe must use
    pub ingredient: Option<String>,
}

impl RecipeSearchQuery {
    /// Collect raw query pairs; tag keys accumulate, any other key may appear once
    fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" => set_once(&key, &mut query.q, value)?,
                "cuisine" => set_once(&key, &mut query.cuisine, value)?,
                "difficulty" => set_once(&key, &mut query.difficulty, value)?,
                "max_time_min" => set_once(&key, &mut query.max_time_min, value)?,
                "max_time" => set_once(&key, &mut query.max_time, value)?,
                "ingredient" => set_once(&key, &mut query.ingredient, value)?,
                "dietary_tags" => query.dietary_tags.push(value),
                "dietary" => query.dietary.push(value),
                _ => {}
            }
        }
        Ok(query)
    }

    /// Split comma separated values; `dietary_tags` wins over its alias
    fn tags(&self) -> Vec<String> {
        let raw = if self.dietary_tags.is_empty() {
            &self.dietary
        } else {
            &self.dietary_tags
        };
        raw.iter()
            .flat_map(|v| v.split(','))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NutritionQuery {
    /// Number of servings (default: 1)
    pub servings: Option<String>,
}

impl NutritionQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = Self::default();
        for (key, value) in pairs {
            if key == "servings" {
                set_once(&key, &mut query.servings, value)?;
            }
        }
        Ok(query)
    }
}

fn set_once(field: &str, slot: &mut Option<String>, value: String) -> Result<(), ApiError> {
    if slot.is_some() {
        return Err(error_response(Error::validation(field, "may only be given once")));
    }
    *slot = Some(value);
    Ok(())
}

pub type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

fn query_pairs(query: QueryPairs) -> Result<Vec<(String, String)>, ApiError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|e| error_response(Error::validation("query", e.body_text())))
}

// Request bodies

#[derive(Debug, Deserialize, JsonSchema, ToSchema)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,
    /// Echoed back; generated when absent
    pub session_id: Option<String>,
}

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Markdown answer
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Matching recipes in catalog order
    pub results: Vec<RecipeSummary>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TechniqueListResponse {
    pub techniques: Vec<Technique>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CuisinesResponse {
    pub cuisines: Vec<Cuisine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DietaryTagsResponse {
    pub dietary_tags: Vec<DietaryTag>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DifficultiesResponse {
    pub difficulties: Vec<Difficulty>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolListResponse {
    pub tools: Vec<ToolSpec>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    pub service: String,
    /// API version
    pub version: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Offending input field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a library error to its HTTP status and body
pub fn error_response(err: Error) -> ApiError {
    let status = if err.is_bad_input() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::warn!(error = %err, "Request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            field: err.field().map(str::to_string),
            error: err.to_string(),
        }),
    )
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| error_response(Error::validation("body", e.body_text())))
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ApiError> {
    raw.trim().parse().map_err(|_| {
        error_response(Error::validation(
            field,
            format!("expected a non-negative integer, got `{}`", raw),
        ))
    })
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: "cooking-assistant".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Send a message to the cooking assistant
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Missing or blank message", body = ErrorResponse)
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request: ChatRequest = parse_input(json_body(body)?).map_err(error_response)?;

    if request.message.trim().is_empty() {
        return Err(error_response(Error::validation("message", "must not be empty")));
    }

    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let response = state.agent.chat(&request.message);

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

/// List all recipes
#[utoipa::path(
    get,
    path = "/api/recipes",
    responses(
        (status = 200, description = "Recipe summaries in catalog order", body = RecipeListResponse)
    ),
    tag = "recipes"
)]
pub async fn list_recipes(State(state): State<AppState>) -> Json<RecipeListResponse> {
    let recipes = state
        .tools
        .store()
        .recipes()
        .iter()
        .map(RecipeSummary::from)
        .collect();

    Json(RecipeListResponse { recipes })
}

/// Get a single recipe by ID
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(
        ("id" = String, Path, description = "Recipe ID, e.g. kimchi_fried_rice")
    ),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    tag = "recipes"
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    state
        .tools
        .store()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_response(Error::RecipeNotFound(id)))
}

/// Search recipes with filters
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    params(RecipeSearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = SearchResponse),
        (status = 400, description = "Invalid filter value", body = ErrorResponse)
    ),
    tag = "recipes"
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = RecipeSearchQuery::from_pairs(query_pairs(query)?)?;

    let max_time_min = match (query.max_time_min.as_deref(), query.max_time.as_deref()) {
        (Some(raw), _) if !raw.trim().is_empty() => Some(parse_number("max_time_min", raw)?),
        (_, Some(raw)) if !raw.trim().is_empty() => Some(parse_number("max_time", raw)?),
        _ => None,
    };

    let tags = query.tags();
    let dietary_tags = (!tags.is_empty()).then_some(tags);

    let params = RecipeSearchParams {
        query: query.q,
        cuisine: query.cuisine,
        difficulty: query.difficulty,
        dietary_tags,
        max_time_min,
        ingredient: query.ingredient,
    };

    let filter = params.to_filter().map_err(error_response)?;
    let results: Vec<RecipeSummary> = state
        .tools
        .store()
        .search(&filter)
        .into_iter()
        .map(RecipeSummary::from)
        .collect();

    tracing::debug!(count = results.len(), "Recipe search");

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

/// Nutrition for a number of servings of a recipe
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/nutrition",
    params(
        ("id" = String, Path, description = "Recipe ID"),
        NutritionQuery
    ),
    responses(
        (status = 200, description = "Scaled nutrition", body = NutritionReport),
        (status = 400, description = "Invalid servings", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    tag = "recipes"
)]
pub async fn recipe_nutrition(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: QueryPairs,
) -> Result<Json<NutritionReport>, ApiError> {
    let query = NutritionQuery::from_pairs(query_pairs(query)?)?;
    let servings = query
        .servings
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| parse_number("servings", raw))
        .transpose()?;

    state
        .tools
        .nutrition_calculator(NutritionCalculatorParams {
            recipe_id: id,
            servings,
        })
        .map(Json)
        .map_err(error_response)
}

/// List all cooking techniques
#[utoipa::path(
    get,
    path = "/api/techniques",
    responses(
        (status = 200, description = "Techniques", body = TechniqueListResponse)
    ),
    tag = "techniques"
)]
pub async fn list_techniques(State(state): State<AppState>) -> Json<TechniqueListResponse> {
    Json(TechniqueListResponse {
        techniques: state.tools.store().techniques().to_vec(),
    })
}

/// Get a technique by ID or name
#[utoipa::path(
    get,
    path = "/api/techniques/{id}",
    params(
        ("id" = String, Path, description = "Technique ID or name, e.g. stir_fry")
    ),
    responses(
        (status = 200, description = "Technique found", body = Technique),
        (status = 404, description = "Technique not found", body = ErrorResponse)
    ),
    tag = "techniques"
)]
pub async fn get_technique(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Technique>, ApiError> {
    state
        .tools
        .cooking_technique(CookingTechniqueParams { technique: id })
        .map(Json)
        .map_err(error_response)
}

/// List accepted cuisines
#[utoipa::path(
    get,
    path = "/api/cuisines",
    responses(
        (status = 200, description = "Cuisines", body = CuisinesResponse)
    ),
    tag = "metadata"
)]
pub async fn list_cuisines() -> Json<CuisinesResponse> {
    Json(CuisinesResponse {
        cuisines: Cuisine::ALL.to_vec(),
    })
}

/// List accepted dietary tags
#[utoipa::path(
    get,
    path = "/api/dietary-tags",
    responses(
        (status = 200, description = "Dietary tags", body = DietaryTagsResponse)
    ),
    tag = "metadata"
)]
pub async fn list_dietary_tags() -> Json<DietaryTagsResponse> {
    Json(DietaryTagsResponse {
        dietary_tags: DietaryTag::ALL.to_vec(),
    })
}

/// List difficulty levels
#[utoipa::path(
    get,
    path = "/api/difficulties",
    responses(
        (status = 200, description = "Difficulty levels", body = DifficultiesResponse)
    ),
    tag = "metadata"
)]
pub async fn list_difficulties() -> Json<DifficultiesResponse> {
    Json(DifficultiesResponse {
        difficulties: Difficulty::ALL.to_vec(),
    })
}

/// Convert a cooking measurement
#[utoipa::path(
    post,
    path = "/api/convert",
    request_body = Object,
    responses(
        (status = 200, description = "Converted quantity", body = Conversion),
        (status = 400, description = "Invalid input or incompatible units", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn convert(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Conversion>, ApiError> {
    let params: UnitConversionParams = parse_input(json_body(body)?).map_err(error_response)?;

    state
        .tools
        .unit_conversion(params)
        .map(Json)
        .map_err(error_response)
}

/// Generate a meal plan
#[utoipa::path(
    post,
    path = "/api/meal-plan",
    request_body = Object,
    responses(
        (status = 200, description = "Day-by-day plan", body = MealPlan),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn meal_plan(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MealPlan>, ApiError> {
    let params: MealPlanParams = parse_input(json_body(body)?).map_err(error_response)?;

    state
        .tools
        .meal_plan(params)
        .map(Json)
        .map_err(error_response)
}

/// List tools with their input schemas
#[utoipa::path(
    get,
    path = "/api/tools",
    responses(
        (status = 200, description = "Available tools", body = ToolListResponse)
    ),
    tag = "tools"
)]
pub async fn list_tools() -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: crate::tools::CookingTools::specs(),
    })
}

/// Invoke a tool by name
#[utoipa::path(
    post,
    path = "/api/tools/{name}",
    params(
        ("name" = String, Path, description = "Tool name, e.g. recipe_search")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Tool result", body = Object),
        (status = 400, description = "Input failed validation", body = ErrorResponse),
        (status = 404, description = "Unknown tool or identifier", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = json_body(body)?;
    state
        .tools
        .invoke(&name, input)
        .map(Json)
        .map_err(error_response)
}
