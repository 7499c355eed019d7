use crate::{error::AppResult, models::log};
use sea_orm::{ActiveModelTrait, DatabaseConnection};

pub struct LogService {
    db: DatabaseConnection,
}

impl LogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one line to the audit log.
    pub async fn record(&self, message: &str) -> AppResult<()> {
        let now = chrono::Utc::now().naive_utc();
        let model = log::ActiveModel {
            message: sea_orm::ActiveValue::Set(message.to_string()),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };
        model.insert(&self.db).await?;
        Ok(())
    }
}
