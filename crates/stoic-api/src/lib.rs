pub mod config;
pub mod error;
pub mod middleware;
pub mod prompt;
pub mod routes;
pub mod state;

pub use routes::build_router;
