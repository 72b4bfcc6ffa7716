//! Stack Advisor service
//!
//! Serves the trained recommendation tree through an HTML form and a JSON
//! endpoint. Artifacts are loaded once at startup and shared read-only.

pub mod config;
pub mod errors;
pub mod page;
pub mod server;

pub use config::ServiceConfig;
pub use errors::ServiceError;
pub use server::{build_router, start_server, AppState, RecommendRequest, RecommendResponse};
