pub mod config;
pub mod error;
pub mod migration;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use schema::{build_schema, AppSchema, AuthUser};
