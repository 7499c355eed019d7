use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Convert into a GraphQL request-level error, logging internals
    /// instead of leaking them to the caller.
    pub fn into_graphql(self) -> async_graphql::Error {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {e:?}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }
        async_graphql::Error::new(self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
