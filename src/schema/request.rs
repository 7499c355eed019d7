use crate::{error::AppError, models::RequestModel, services::request::RequestService};
use async_graphql::{Context, Object, Result, SimpleObject};
use sea_orm::DatabaseConnection;

#[derive(Debug, SimpleObject)]
#[graphql(name = "Request")]
pub struct RequestType {
    pub id: i32,
    pub mentor_id: i32,
    pub mentee_id: i32,
    pub question: String,
    pub status: String,
}

impl From<RequestModel> for RequestType {
    fn from(request: RequestModel) -> Self {
        Self {
            id: request.id,
            mentor_id: request.mentor_id,
            mentee_id: request.mentee_id,
            question: request.question,
            status: request.status,
        }
    }
}

#[derive(SimpleObject)]
pub struct RequestPayload {
    pub request: RequestType,
}

#[derive(Default)]
pub struct RequestQuery;

#[Object]
impl RequestQuery {
    /// Every mentorship request, id ascending.
    async fn all_requests(&self, ctx: &Context<'_>) -> Result<Vec<RequestType>> {
        let service = RequestService::new(db(ctx));
        let requests = service.list_all().await.map_err(AppError::into_graphql)?;
        Ok(requests.into_iter().map(RequestType::from).collect())
    }

    /// Requests opened by the given mentee, id ascending.
    async fn user_requests(&self, ctx: &Context<'_>, mentee_id: i32) -> Result<Vec<RequestType>> {
        let service = RequestService::new(db(ctx));
        let requests = service
            .list_for_mentee(mentee_id)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(requests.into_iter().map(RequestType::from).collect())
    }
}

#[derive(Default)]
pub struct RequestMutation;

#[Object]
impl RequestMutation {
    /// Open a pending request from a mentee to a mentor.
    async fn create_request(
        &self,
        ctx: &Context<'_>,
        mentor_id: i32,
        mentee_id: i32,
        question: String,
    ) -> Result<RequestPayload> {
        let service = RequestService::new(db(ctx));
        let request = service
            .create(mentor_id, mentee_id, &question)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(RequestPayload {
            request: request.into(),
        })
    }

    /// Mark a request accepted.
    async fn accept_request(&self, ctx: &Context<'_>, request_id: i32) -> Result<RequestPayload> {
        let service = RequestService::new(db(ctx));
        let request = service
            .accept(request_id)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(RequestPayload {
            request: request.into(),
        })
    }

    /// Mark a request rejected.
    async fn reject_request(&self, ctx: &Context<'_>, request_id: i32) -> Result<RequestPayload> {
        let service = RequestService::new(db(ctx));
        let request = service
            .reject(request_id)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(RequestPayload {
            request: request.into(),
        })
    }
}

fn db(ctx: &Context<'_>) -> DatabaseConnection {
    ctx.data_unchecked::<DatabaseConnection>().clone()
}
