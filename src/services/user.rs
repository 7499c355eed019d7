use crate::{
    error::{AppError, AppResult},
    models::{user, User, UserModel},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserModel>> {
        let users = User::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    pub async fn list_mentors(&self) -> AppResult<Vec<UserModel>> {
        let mentors = User::find()
            .filter(user::Column::IsMentor.eq(true))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(mentors)
    }

    /// A mentor is a user with the flag set; a plain user id is not enough.
    pub async fn get_mentor(&self, mentor_id: i32) -> AppResult<UserModel> {
        User::find_by_id(mentor_id)
            .filter(user::Column::IsMentor.eq(true))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}
