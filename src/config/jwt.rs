use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: u64,
    pub refresh_token_expiry: u64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        let access = env::var("JWT_ACCESS_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok());
        let refresh = env::var("JWT_REFRESH_EXPIRATION")
            .ok()
            .and_then(|s| s.parse().ok());

        Self::from_parts(secret, access, refresh)
    }

    fn from_parts(secret: String, access: Option<u64>, refresh: Option<u64>) -> Result<Self> {
        if secret.len() < 32 {
            return Err(anyhow::anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        Ok(Self {
            secret,
            // Session tokens are short-lived (5 minutes); refresh tokens
            // carry the week-long session.
            access_token_expiry: access.unwrap_or(300),
            refresh_token_expiry: refresh.unwrap_or(604800),
        })
    }
}
