//! HTTP API tests, driven through the router without a socket

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cooking_assistant::agent::CookingAgent;
use cooking_assistant::api::{create_router, AppState};
use cooking_assistant::config::Config;
use cooking_assistant::store::RecipeStore;
use cooking_assistant::tools::CookingTools;

fn app() -> Router {
    let config = Config::default();
    let store = Arc::new(RecipeStore::builtin().expect("Built-in catalog should load"));
    let tools = Arc::new(CookingTools::new(store, &config));
    let agent = Arc::new(CookingAgent::new(tools.clone(), &config));
    create_router(AppState::new(tools, agent))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(uri, body.to_string()).await
}

async fn post_raw(uri: &str, body: String) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health", "/api/health"] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "healthy");
            assert_eq!(body["service"], "cooking-assistant");
            assert!(body["timestamp"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (status, body) = get("/api/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/recipes/search"].is_object());
        assert!(body["paths"]["/api/chat"].is_object());
    }

    #[tokio::test]
    async fn test_frontend_and_spa_fallback() {
        for uri in ["/", "/recipes/kimchi_fried_rice"] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
            assert!(content_type.starts_with("text/html"), "{}", content_type);
        }
    }
}

mod recipe_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_recipes() {
        let (status, body) = get("/api/recipes").await;
        assert_eq!(status, StatusCode::OK);

        let recipes = body["recipes"].as_array().unwrap();
        assert_eq!(recipes.len(), 10);
        assert_eq!(recipes[0]["id"], "kimchi_fried_rice");
        assert_eq!(recipes[0]["total_time"], 25);
    }

    #[tokio::test]
    async fn test_get_recipe() {
        let (status, body) = get("/api/recipes/kimchi_fried_rice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Kimchi Fried Rice (Kimchi Bokkeumbap)");

        let instructions = body["instructions"].as_array().unwrap();
        assert_eq!(instructions.len(), 9);
        assert_eq!(
            instructions[0],
            "Heat vegetable oil in a large pan or wok over high heat."
        );
    }

    #[tokio::test]
    async fn test_get_recipe_is_exact() {
        let (status, body) = get("/api/recipes/kimchi").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("kimchi"));
    }

    #[tokio::test]
    async fn test_search_italian_under_thirty() {
        let (status, body) = get("/api/recipes/search?cuisine=italian&max_time_min=30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["id"], "pasta_aglio_olio");

        let (status, body) = get("/api/recipes/search?cuisine=Italian&max_time=30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_search_without_filters() {
        let (status, body) = get("/api/recipes/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 10);
    }

    #[tokio::test]
    async fn test_search_tags_and_ingredient() {
        let (_, body) = get("/api/recipes/search?dietary_tags=vegan,gluten_free").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["id"], "vegetable_curry");

        let (_, body) = get("/api/recipes/search?dietary=keto").await;
        assert_eq!(body["results"][0]["id"], "french_omelette");

        let (_, body) = get("/api/recipes/search?ingredient=tofu").await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["id"], "miso_soup");

        let (_, body) = get("/api/recipes/search?q=durian").await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_search_repeated_tags() {
        for uri in [
            "/api/recipes/search?dietary=vegan&dietary=gluten_free",
            "/api/recipes/search?dietary_tags=vegan&dietary_tags=gluten_free",
            "/api/recipes/search?dietary_tags=vegan&dietary_tags=gluten_free,dairy_free",
        ] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["count"], 1, "{}", uri);
            assert_eq!(body["results"][0]["id"], "vegetable_curry", "{}", uri);
        }

        let (status, body) = get("/api/recipes/search?dietary=vegan&dietary=unicorn").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "dietary_tags");
    }

    #[tokio::test]
    async fn test_search_rejects_repeated_scalars() {
        let (status, body) = get("/api/recipes/search?cuisine=italian&cuisine=thai").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "cuisine");

        let (status, body) =
            get("/api/recipes/kimchi_fried_rice/nutrition?servings=1&servings=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "servings");
    }

    #[tokio::test]
    async fn test_search_rejects_bad_values() {
        let cases = [
            ("/api/recipes/search?cuisine=martian", "cuisine"),
            ("/api/recipes/search?difficulty=extreme", "difficulty"),
            ("/api/recipes/search?max_time_min=abc", "max_time_min"),
            ("/api/recipes/search?max_time_min=-5", "max_time_min"),
            ("/api/recipes/search?max_time=soon", "max_time"),
            ("/api/recipes/search?max_time_min=5000000000", "max_time_min"),
            ("/api/recipes/search?dietary_tags=vegan,unicorn", "dietary_tags"),
        ];

        for (uri, field) in cases {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["field"], field, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_recipe_nutrition() {
        let (status, body) = get("/api/recipes/kimchi_fried_rice/nutrition?servings=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["servings_calculated"], 2);
        assert_eq!(body["nutrition"]["calories"], 1040);

        let (status, body) = get("/api/recipes/greek_salad/nutrition").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["nutrition"].is_null());

        let (status, body) = get("/api/recipes/kimchi_fried_rice/nutrition?servings=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "servings");

        let (status, body) =
            get("/api/recipes/kimchi_fried_rice/nutrition?servings=10000000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "servings");

        let (status, _) = get("/api/recipes/lasagna/nutrition").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod reference_tests {
    use super::*;

    #[tokio::test]
    async fn test_techniques() {
        let (status, body) = get("/api/techniques").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["techniques"].as_array().unwrap().len(), 5);

        let (status, body) = get("/api/techniques/stir-fry").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Stir-Fry");

        let (status, _) = get("/api/techniques/flambe").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metadata_lists() {
        let (_, body) = get("/api/cuisines").await;
        assert_eq!(body["cuisines"].as_array().unwrap().len(), 10);
        assert_eq!(body["cuisines"][0], "korean");

        let (_, body) = get("/api/dietary-tags").await;
        assert_eq!(body["dietary_tags"].as_array().unwrap().len(), 8);
        assert_eq!(body["dietary_tags"][2], "gluten_free");

        let (_, body) = get("/api/difficulties").await;
        assert_eq!(body["difficulties"], json!(["easy", "medium", "hard"]));
    }
}

mod tool_tests {
    use super::*;

    #[tokio::test]
    async fn test_convert() {
        let (status, body) = post(
            "/api/convert",
            json!({"amount": 2, "from_unit": "cups", "to_unit": "ml"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["converted"]["amount"], 473.18);
        assert_eq!(body["type"], "volume");
    }

    #[tokio::test]
    async fn test_convert_rejections() {
        let (status, body) = post(
            "/api/convert",
            json!({"amount": "two", "from_unit": "cups", "to_unit": "ml"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "amount");

        let (status, body) = post("/api/convert", json!({"amount": 1, "from_unit": "cup"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "to_unit");

        let (status, body) = post(
            "/api/convert",
            json!({"amount": 1, "from_unit": "cup", "to_unit": "g"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn test_meal_plan() {
        let (status, body) = post("/api/meal-plan", json!({"days": 3})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_days"], 3);
        assert_eq!(body["meal_plan"][2]["day"], 3);

        let (status, body) = post("/api/meal-plan", json!({"days": 0})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "days");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let (status, body) = get("/api/tools").await;
        assert_eq!(status, StatusCode::OK);

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[0]["name"], "recipe_search");
        assert!(tools[0]["input_schema"]["properties"]["cuisine"].is_object());
    }

    #[tokio::test]
    async fn test_invoke_tool() {
        let (status, body) = post("/api/tools/recipe_search", json!({"cuisine": "korean"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], 1);

        let (status, body) = post(
            "/api/tools/timer_calculator",
            json!({"food_item": "steak", "cooking_method": "bake"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available_methods"], json!(["grill", "pan_sear"]));

        let (status, body) = post("/api/tools/recipe_detail", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "recipe_id");

        let (status, _) = post("/api/tools/make_coffee", json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_generates_session() {
        let (status, body) = post("/api/chat", json!({"message": "hello"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().starts_with("# Cooking Assistant"));

        let session = body["session_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(session).is_ok());
    }

    #[tokio::test]
    async fn test_chat_echoes_session() {
        let (status, body) = post(
            "/api/chat",
            json!({"message": "Show me Italian recipes", "session_id": "kitchen-1"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_id"], "kitchen-1");
        assert!(body["response"].as_str().unwrap().contains("Pasta Aglio e Olio"));
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let (status, body) = post("/api/chat", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "message");

        let (status, body) = post("/api/chat", json!({"message": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "message");

        let (status, body) = post_raw("/api/chat", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field"], "body");
    }
}
