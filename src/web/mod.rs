//! Web server module
//!
//! Serves the GraphQL endpoint, the GraphiQL console and a health check.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
