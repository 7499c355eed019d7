use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A mentorship request linking one mentor and one mentee.
/// Status is "Pending" until a mentor accepts or rejects it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub mentor_id: i32,
    pub mentee_id: i32,
    pub question: String,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MentorId",
        to = "super::user::Column::Id"
    )]
    Mentor,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MenteeId",
        to = "super::user::Column::Id"
    )]
    Mentee,
}

impl ActiveModelBehavior for ActiveModel {}
