pub mod request;
pub mod user;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use sea_orm::DatabaseConnection;

#[derive(MergedObject, Default)]
pub struct QueryRoot(user::UserQuery, request::RequestQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(user::UserMutation, request::RequestMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(db: DatabaseConnection) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .finish()
}

/// Caller identity decoded from the bearer token before execution.
/// Absent from the context when the request is anonymous.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
}
