use crate::schema::{AppSchema, AuthUser};
use crate::utils::jwt::{decode_jwt, is_access_token};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

pub fn create_routes() -> Router {
    Router::new().route("/graphql", get(graphiql).post(graphql_handler))
}

async fn graphql_handler(
    Extension(schema): Extension<AppSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(user) = authenticate(&headers) {
        request = request.data(user);
    }
    schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Invalid or absent credentials leave the request anonymous; resolvers
/// that need an identity decide how to fail.
fn authenticate(headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_bearer_token(headers)?;
    let claims = decode_jwt(&token).ok()?;

    // Refresh tokens are only good for the refreshToken mutation,
    // which validates them itself.
    if !is_access_token(&claims) {
        return None;
    }

    let user_id = claims.sub.parse().ok()?;
    Some(AuthUser { user_id })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
