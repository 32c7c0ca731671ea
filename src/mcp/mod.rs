//! Model Context Protocol surface

pub mod server;

pub use server::{serve_http, serve_stdio, CookingServer};
