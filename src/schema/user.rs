use crate::{
    error::AppError,
    models::UserModel,
    schema::AuthUser,
    services::auth::{AuthService, RegisterProfile},
    services::user::UserService,
};
use async_graphql::{Context, Object, Result, SimpleObject};
use sea_orm::DatabaseConnection;

#[derive(Debug, SimpleObject)]
#[graphql(name = "User")]
pub struct UserType {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub bio: String,
    pub occupation: String,
    pub expertise: String,
    pub is_active: bool,
    pub is_mentor: bool,
    pub is_staff: bool,
}

impl From<UserModel> for UserType {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            address: user.address,
            bio: user.bio,
            occupation: user.occupation,
            expertise: user.expertise,
            is_active: user.is_active,
            is_mentor: user.is_mentor,
            is_staff: user.is_staff,
        }
    }
}

#[derive(SimpleObject)]
pub struct RegisterUserPayload {
    pub user: UserType,
    pub token: String,
    pub refresh_token: String,
}

#[derive(SimpleObject)]
pub struct TokenPayload {
    pub token: String,
    pub refresh_token: String,
}

#[derive(SimpleObject)]
pub struct ChangeUserToMentorPayload {
    pub success: bool,
}

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Every registered user, id ascending.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserType>> {
        let service = UserService::new(db(ctx));
        let users = service.list_users().await.map_err(AppError::into_graphql)?;
        Ok(users.into_iter().map(UserType::from).collect())
    }

    /// Users who have opted in as mentors.
    async fn mentors(&self, ctx: &Context<'_>) -> Result<Vec<UserType>> {
        let service = UserService::new(db(ctx));
        let mentors = service
            .list_mentors()
            .await
            .map_err(AppError::into_graphql)?;
        Ok(mentors.into_iter().map(UserType::from).collect())
    }

    /// A single mentor by id. Errors if the id is unknown or the user
    /// is not a mentor.
    async fn mentor(&self, ctx: &Context<'_>, mentor_id: i32) -> Result<UserType> {
        let service = UserService::new(db(ctx));
        let mentor = service
            .get_mentor(mentor_id)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(mentor.into())
    }

    /// The authenticated caller's own record.
    async fn me(&self, ctx: &Context<'_>) -> Result<UserType> {
        let auth = ctx
            .data_opt::<AuthUser>()
            .ok_or_else(|| AppError::Unauthorized.into_graphql())?;
        let service = AuthService::new(db(ctx));
        let user = service
            .get_user_by_id(auth.user_id)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(user.into())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create an account and sign the new user in.
    #[allow(clippy::too_many_arguments)]
    async fn register_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        first_name: String,
        last_name: String,
        address: Option<String>,
        bio: Option<String>,
        occupation: Option<String>,
        expertise: Option<String>,
        is_active: Option<bool>,
        is_mentor: Option<bool>,
        is_staff: Option<bool>,
    ) -> Result<RegisterUserPayload> {
        let service = AuthService::new(db(ctx));
        let profile = RegisterProfile {
            address,
            bio,
            occupation,
            expertise,
            is_active,
            is_mentor,
            is_staff,
        };
        let (user, token, refresh_token) = service
            .register(&email, &password, &first_name, &last_name, profile)
            .await
            .map_err(AppError::into_graphql)?;

        Ok(RegisterUserPayload {
            user: user.into(),
            token,
            refresh_token,
        })
    }

    /// Validate credentials and issue a token pair.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<TokenPayload> {
        let service = AuthService::new(db(ctx));
        let (token, refresh_token) = service
            .login(&email, &password)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(TokenPayload {
            token,
            refresh_token,
        })
    }

    /// Trade a live refresh token for a new pair. The presented token
    /// is invalidated in the same transaction.
    async fn refresh_token(&self, ctx: &Context<'_>, refresh_token: String) -> Result<TokenPayload> {
        let service = AuthService::new(db(ctx));
        let (token, refresh_token) = service
            .rotate_refresh_token(&refresh_token)
            .await
            .map_err(AppError::into_graphql)?;
        Ok(TokenPayload {
            token,
            refresh_token,
        })
    }

    /// Mark the caller as a mentor. Reports success = false instead of
    /// erroring when the caller cannot be resolved.
    async fn change_user_to_mentor(&self, ctx: &Context<'_>) -> Result<ChangeUserToMentorPayload> {
        let success = match ctx.data_opt::<AuthUser>() {
            Some(auth) => {
                let service = AuthService::new(db(ctx));
                service
                    .promote_to_mentor(auth.user_id)
                    .await
                    .map_err(AppError::into_graphql)?
            }
            None => false,
        };
        Ok(ChangeUserToMentorPayload { success })
    }
}

fn db(ctx: &Context<'_>) -> DatabaseConnection {
    ctx.data_unchecked::<DatabaseConnection>().clone()
}
