use std::sync::Arc;

use validator::Validate;

use crate::database::UserRepository;
use crate::dto::user_dto::LoginPayload;
use crate::error::{Error, Result};
use crate::models::user::{Principal, User};
use crate::utils::crypto::verify_password;
use crate::utils::token::{decode_session_token, issue_session_token};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: Arc<str>,
    session_ttl_hours: i64,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str, session_ttl_hours: i64) -> Self {
        Self {
            users,
            jwt_secret: Arc::from(jwt_secret),
            session_ttl_hours,
        }
    }

    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, payload: LoginPayload) -> Result<(String, User)> {
        payload.validate()?;
        let email = payload.email.trim().to_lowercase();
        let Some(user) = self.users.find_user_by_email(&email).await? else {
            tracing::info!("login refused: unknown email");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.into()));
        };
        if !verify_password(&payload.password, &user.hashed_password)? {
            tracing::info!(user_id = %user.id, "login refused: wrong password");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let token = issue_session_token(
            &Principal::from(&user),
            &self.jwt_secret,
            self.session_ttl_hours,
        )?;
        tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok((token, user))
    }

    pub fn resolve_session(&self, token: &str) -> Option<Principal> {
        decode_session_token(token, &self.jwt_secret)
    }

    pub fn session_ttl_hours(&self) -> i64 {
        self.session_ttl_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::models::user::Role;
    use crate::utils::crypto::hash_password;
    use chrono::Utc;
    use uuid::Uuid;

    async fn service() -> AuthService {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_user(&User {
                id: Uuid::new_v4(),
                email: "admin@example.nl".into(),
                name: "Admin".into(),
                hashed_password: hash_password("super-secret").unwrap(),
                role: Role::Admin,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        AuthService::new(store, "test-secret", 1)
    }

    #[tokio::test]
    async fn login_issues_a_resolvable_session() {
        let svc = service().await;
        let (token, user) = svc
            .login(LoginPayload {
                email: "ADMIN@example.nl".into(),
                password: "super-secret".into(),
            })
            .await
            .unwrap();
        let principal = svc.resolve_session(&token).unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.role, Role::Admin);
    }

    #[tokio::test]
    async fn bad_credentials_share_one_message() {
        let svc = service().await;
        let wrong_password = svc
            .login(LoginPayload {
                email: "admin@example.nl".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        let unknown = svc
            .login(LoginPayload {
                email: "ghost@example.nl".into(),
                password: "nope".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown.to_string());
        assert!(matches!(unknown, Error::Unauthorized(_)));
    }
}
