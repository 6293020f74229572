use sqlx::PgPool;
use storage::{
    models::{User, UserRole},
    repository::user::{UserRepository, normalize_email},
    services::credentials,
};

use crate::error::{Result, SeederError};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@finderforce.com";
pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            name: DEFAULT_ADMIN_NAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl AdminAccount {
    pub fn validate(&self) -> Result<()> {
        let email = normalize_email(&self.email);
        if email.is_empty() || !email.contains('@') {
            return Err(SeederError::ValidationError(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(SeederError::ValidationError(format!(
                "Admin password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Create the administrator, or reset the role and password of an
/// existing account with the same email.
pub async fn seed_admin(pool: &PgPool, account: &AdminAccount) -> Result<User> {
    account.validate()?;

    let repo = UserRepository::new(pool);
    let existed = repo.find_by_email(&account.email).await?.is_some();

    let password_hash = credentials::hash_password(&account.password)?;
    let admin = repo
        .upsert_admin(&account.email, &account.name, &password_hash)
        .await?;

    if existed {
        tracing::info!(email = %admin.email, "Updated existing admin account");
    } else {
        tracing::info!(email = %admin.email, "Created admin account");
    }

    Ok(admin)
}

/// Whether `password` opens the admin account registered under `email`.
pub async fn check_admin(pool: &PgPool, email: &str, password: &str) -> Result<bool> {
    let Some(user) = UserRepository::new(pool).find_by_email(email).await? else {
        return Ok(false);
    };

    Ok(user.role == UserRole::Admin && credentials::verify_password(password, &user.password_hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_account_is_valid() {
        let account = AdminAccount::default();
        assert_eq!(account.email, "admin@finderforce.com");
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_password_and_bad_email() {
        let short = AdminAccount {
            password: "abc".to_string(),
            ..AdminAccount::default()
        };
        assert!(matches!(short.validate(), Err(SeederError::ValidationError(_))));

        let no_at = AdminAccount {
            email: "admin".to_string(),
            ..AdminAccount::default()
        };
        assert!(matches!(no_at.validate(), Err(SeederError::ValidationError(_))));
    }
}
