use crate::{
    error::{AppError, AppResult},
    models::{refresh_token, user, RefreshToken, User, UserModel},
    utils::{
        encode_access_token, encode_refresh_token, hash_password, normalize_email, verify_password,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};

/// Profile fields accepted at registration. Everything here is optional;
/// missing strings default to empty, flags to the column defaults.
#[derive(Debug, Default)]
pub struct RegisterProfile {
    pub address: Option<String>,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub expertise: Option<String>,
    pub is_active: Option<bool>,
    pub is_mentor: Option<bool>,
    pub is_staff: Option<bool>,
}

pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new user.
    /// Returns (user_model, access_token, refresh_token).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        profile: RegisterProfile,
    ) -> AppResult<(UserModel, String, String)> {
        if email.is_empty() {
            return Err(AppError::Validation(
                "User must have an email address".to_string(),
            ));
        }

        let email = normalize_email(email);
        if self.email_taken(&email).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(password)?;
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            email: sea_orm::ActiveValue::Set(email),
            password_hash: sea_orm::ActiveValue::Set(password_hash),
            first_name: sea_orm::ActiveValue::Set(first_name.to_string()),
            last_name: sea_orm::ActiveValue::Set(last_name.to_string()),
            address: sea_orm::ActiveValue::Set(profile.address.unwrap_or_default()),
            bio: sea_orm::ActiveValue::Set(profile.bio.unwrap_or_default()),
            occupation: sea_orm::ActiveValue::Set(profile.occupation.unwrap_or_default()),
            expertise: sea_orm::ActiveValue::Set(profile.expertise.unwrap_or_default()),
            is_active: sea_orm::ActiveValue::Set(profile.is_active.unwrap_or(true)),
            is_mentor: sea_orm::ActiveValue::Set(profile.is_mentor.unwrap_or(false)),
            is_staff: sea_orm::ActiveValue::Set(profile.is_staff.unwrap_or(false)),
            is_superuser: sea_orm::ActiveValue::Set(false),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let user = new_user.insert(&self.db).await?;
        let (access_token, refresh_token) = self.issue_tokens_for_user(&self.db, &user).await?;

        Ok((user, access_token, refresh_token))
    }

    /// Validate credentials and issue a fresh token pair. The email must
    /// match the stored (normalized-at-registration) form exactly.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, String)> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let is_valid = verify_password(password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::Unauthorized);
        }

        self.issue_tokens_for_user(&self.db, &user).await
    }

    /// Exchange a valid refresh token for a new pair, invalidating the old one.
    pub async fn rotate_refresh_token(&self, presented: &str) -> AppResult<(String, String)> {
        let claims = crate::utils::jwt::decode_jwt(presented).map_err(|_| AppError::Unauthorized)?;
        if !crate::utils::jwt::is_refresh_token(&claims) {
            return Err(AppError::Unauthorized);
        }
        let user_id: i32 = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

        let token_hash = crate::utils::jwt::hash_refresh_token(presented);
        let now = chrono::Utc::now().naive_utc();

        let existing = RefreshToken::find()
            .filter(refresh_token::Column::UserId.eq(user_id))
            .filter(refresh_token::Column::Token.eq(token_hash))
            .one(&self.db)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if existing.expires_at <= now {
            let _ = RefreshToken::delete_by_id(existing.id).exec(&self.db).await;
            return Err(AppError::Unauthorized);
        }

        let user = self.get_user_by_id(user_id).await?;

        let txn = self.db.begin().await?;
        RefreshToken::delete_by_id(existing.id).exec(&txn).await?;
        let pair = self.issue_tokens_for_user(&txn, &user).await?;
        txn.commit().await?;
        Ok(pair)
    }

    /// Flip is_mentor on the caller's own record. Mirrors the forgiving
    /// surface of the mutation: a missing user yields Ok(false), not an error.
    pub async fn promote_to_mentor(&self, user_id: i32) -> AppResult<bool> {
        let user = User::find_by_id(user_id).one(&self.db).await?;

        let Some(user) = user else {
            return Ok(false);
        };

        let now = chrono::Utc::now().naive_utc();
        let mut active: user::ActiveModel = user.into();
        active.is_mentor = sea_orm::ActiveValue::Set(true);
        active.updated_at = sea_orm::ActiveValue::Set(now);
        active.update(&self.db).await?;

        Ok(true)
    }

    pub async fn get_user_by_id(&self, id: i32) -> AppResult<UserModel> {
        let user = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(user)
    }

    async fn email_taken(&self, email: &str) -> AppResult<bool> {
        let count = User::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn issue_tokens_for_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user: &UserModel,
    ) -> AppResult<(String, String)> {
        let user_id_str = user.id.to_string();
        let access_token = encode_access_token(&user_id_str, user.is_mentor)?;
        let refresh_token = encode_refresh_token(&user_id_str, user.is_mentor)?;
        self.persist_refresh_token(conn, user.id, &refresh_token)
            .await?;
        Ok((access_token, refresh_token))
    }

    async fn persist_refresh_token<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i32,
        refresh_token: &str,
    ) -> AppResult<()> {
        let now = chrono::Utc::now().naive_utc();
        let expires_at = now
            + chrono::Duration::seconds(crate::utils::jwt::refresh_token_expiry_seconds() as i64);

        let model = refresh_token::ActiveModel {
            user_id: sea_orm::ActiveValue::Set(user_id),
            token: sea_orm::ActiveValue::Set(crate::utils::jwt::hash_refresh_token(refresh_token)),
            expires_at: sea_orm::ActiveValue::Set(expires_at),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };
        model.insert(conn).await?;
        Ok(())
    }
}
