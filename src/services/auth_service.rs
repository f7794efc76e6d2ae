use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tokio::sync::RwLock;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::AdminUser;
use crate::utils::crypto::{hash_password, verify_password};

/// Admin credential store. Accounts are seeded from configuration at startup
/// with their passwords argon2-hashed; plaintext never outlives `new`.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<RwLock<Vec<AdminUser>>>,
}

impl AuthService {
    pub fn new(admin_username: &str, admin_password: &str) -> Result<Self> {
        let admin = AdminUser {
            id: 1,
            username: admin_username.to_string(),
            password_hash: hash_password(admin_password)?,
            created_at: Utc::now(),
        };
        Ok(Self {
            users: Arc::new(RwLock::new(vec![admin])),
        })
    }

    /// Verifies a credential pair and issues a bearer token. Unknown users
    /// and bad passwords are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, AdminUser)> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(username, "Rejected login with bad password");
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let token = issue_token(user)?;
        Ok((token, user.clone()))
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

fn issue_token(user: &AdminUser) -> Result<String> {
    let config = get_config();
    let expires_at = Utc::now() + Duration::hours(config.token_expiry_hours);
    let claims = Claims {
        sub: user.id.to_string(),
        exp: expires_at.timestamp() as usize,
        role: Some("admin".to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn init_test_config() {
        env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
        env::set_var("JWT_SECRET", "unit_test_secret");
        env::set_var("ADMIN_USERNAME", "admin");
        env::set_var("ADMIN_PASSWORD", "admin_pw");
        env::set_var("PUBLIC_RPS", "100");
        env::set_var("ADMIN_RPS", "100");
        env::set_var("SESSION_TTL_MINUTES", "30");
        env::set_var("TOKEN_EXPIRY_HOURS", "1");
        let _ = crate::config::init_config();
    }

    #[tokio::test]
    async fn login_accepts_the_seeded_admin_only() {
        init_test_config();
        let service = AuthService::new("admin", "admin_pw").unwrap();

        let (token, user) = service.login("admin", "admin_pw").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(user.username, "admin");

        assert!(service.login("admin", "wrong").await.is_err());
        assert!(service.login("nobody", "admin_pw").await.is_err());
    }
}
