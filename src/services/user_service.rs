use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::database::UserRepository;
use crate::dto::user_dto::{ChangePasswordPayload, CreateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{Principal, Role, User};
use crate::services::access::require_role;
use crate::utils::crypto::{hash_password, verify_password, MIN_PASSWORD_LENGTH};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<User>> {
        require_role(principal, Role::Admin)?;
        self.users.list_users().await
    }

    /// Staff accounts are only ever created here. Creating a `SUPER_ADMIN`
    /// needs a `SUPER_ADMIN` caller.
    pub async fn create(&self, principal: &Principal, payload: CreateUserPayload) -> Result<User> {
        require_role(principal, Role::Admin)?;
        if payload.role == Role::SuperAdmin {
            require_role(principal, Role::SuperAdmin)?;
        }
        payload.validate()?;

        let email = payload.email.trim().to_lowercase();
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(Error::Conflict(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            name: payload.name.trim().to_string(),
            hashed_password: hash_password(&payload.password)?,
            role: payload.role,
            created_at: Utc::now(),
        };
        self.users.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, created_by = %principal.id, "user created");
        Ok(user)
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<()> {
        require_role(principal, Role::Admin)?;
        if principal.id == id {
            return Err(Error::BadRequest("You cannot delete your own account".into()));
        }
        let target = self
            .users
            .find_user(id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".into()))?;
        if target.role == Role::SuperAdmin {
            require_role(principal, Role::SuperAdmin)?;
        }
        self.users.delete_user(id).await?;
        tracing::info!(user_id = %id, deleted_by = %principal.id, "user deleted");
        Ok(())
    }

    /// Length is checked before anything is read from storage; the stored
    /// hash is only replaced after the current password verifies.
    pub async fn change_password(
        &self,
        principal: &Principal,
        payload: ChangePasswordPayload,
    ) -> Result<()> {
        payload.validate()?;

        let user = self
            .users
            .find_user(principal.id)
            .await?
            .ok_or_else(|| Error::Unauthorized("Session user no longer exists".into()))?;
        if !verify_password(&payload.current_password, &user.hashed_password)? {
            tracing::warn!(user_id = %user.id, "password change refused: wrong current password");
            return Err(Error::BadRequest("Current password is incorrect".into()));
        }

        let hashed = hash_password(&payload.new_password)?;
        self.users.update_password(user.id, &hashed).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    /// Creates the first `SUPER_ADMIN` when no account with that email exists.
    pub async fn bootstrap_super_admin(&self, email: &str, name: &str, password: &str) -> Result<bool> {
        let email = email.trim().to_lowercase();
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Ok(false);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::Config(format!(
                "Bootstrap password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            name: name.to_string(),
            hashed_password: hash_password(password)?,
            role: Role::SuperAdmin,
            created_at: Utc::now(),
        };
        self.users.insert_user(&user).await?;
        tracing::info!(user_id = %user.id, "bootstrap super admin created");
        Ok(true)
    }
}
