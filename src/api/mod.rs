//! HTTP API layer

mod handlers;
mod routes;

pub use handlers::{error_response, ErrorResponse};
pub use routes::{create_router, create_router_with_mcp, ApiDoc, AppState};
