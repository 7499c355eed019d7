use crate::{
    error::{AppError, AppResult},
    models::{request, Request, RequestModel, User},
    services::log::LogService,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_ACCEPTED: &str = "Accepted";
pub const STATUS_REJECTED: &str = "Rejected";

pub struct RequestService {
    db: DatabaseConnection,
    logs: LogService,
}

impl RequestService {
    pub fn new(db: DatabaseConnection) -> Self {
        let logs = LogService::new(db.clone());
        Self { db, logs }
    }

    /// Create a pending request from a mentee to a mentor.
    /// Both ids must resolve to existing users.
    pub async fn create(
        &self,
        mentor_id: i32,
        mentee_id: i32,
        question: &str,
    ) -> AppResult<RequestModel> {
        let mentor = User::find_by_id(mentor_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Validation("Mentor not found".to_string()))?;
        let mentee = User::find_by_id(mentee_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Validation("Mentee not found".to_string()))?;

        let now = chrono::Utc::now().naive_utc();
        let model = request::ActiveModel {
            mentor_id: sea_orm::ActiveValue::Set(mentor.id),
            mentee_id: sea_orm::ActiveValue::Set(mentee.id),
            question: sea_orm::ActiveValue::Set(question.to_string()),
            status: sea_orm::ActiveValue::Set(STATUS_PENDING.to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let saved = model.insert(&self.db).await?;
        self.append_log(&format!(
            "request {} created: mentee {} asked mentor {}",
            saved.id, saved.mentee_id, saved.mentor_id
        ))
        .await;
        Ok(saved)
    }

    pub async fn accept(&self, request_id: i32) -> AppResult<RequestModel> {
        self.set_status(request_id, STATUS_ACCEPTED).await
    }

    pub async fn reject(&self, request_id: i32) -> AppResult<RequestModel> {
        self.set_status(request_id, STATUS_REJECTED).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<RequestModel>> {
        let requests = Request::find()
            .order_by_asc(request::Column::Id)
            .all(&self.db)
            .await?;
        Ok(requests)
    }

    /// Every request a mentee has opened, id ascending.
    pub async fn list_for_mentee(&self, mentee_id: i32) -> AppResult<Vec<RequestModel>> {
        User::find_by_id(mentee_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::Validation("Mentee not found".to_string()))?;

        let requests = Request::find()
            .filter(request::Column::MenteeId.eq(mentee_id))
            .order_by_asc(request::Column::Id)
            .all(&self.db)
            .await?;
        Ok(requests)
    }

    // No guard on the previous status: an already-rejected request can still
    // be accepted, matching the forgiving surface of the mutations.
    async fn set_status(&self, request_id: i32, status: &str) -> AppResult<RequestModel> {
        let existing = Request::find_by_id(request_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = chrono::Utc::now().naive_utc();
        let mut active: request::ActiveModel = existing.into();
        active.status = sea_orm::ActiveValue::Set(status.to_string());
        active.updated_at = sea_orm::ActiveValue::Set(now);
        let updated = active.update(&self.db).await?;

        self.append_log(&format!(
            "request {} marked {}",
            updated.id,
            status.to_lowercase()
        ))
        .await;
        Ok(updated)
    }

    // Audit lines are best-effort; a failed insert must not fail the mutation.
    async fn append_log(&self, message: &str) {
        if let Err(e) = self.logs.record(message).await {
            tracing::warn!("Failed to write audit log: {e}");
        }
    }
}
