use sqlx::{PgConnection, PgPool};

use crate::error::Result;
use crate::models::{User, UserRole};

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create the administrator account, or promote and re-key an existing
    /// user with that email.
    pub async fn upsert_admin(&self, email: &str, name: &str, password_hash: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email)
            DO UPDATE SET
                role = EXCLUDED.role,
                password_hash = EXCLUDED.password_hash
            RETURNING user_id, email, name, password_hash, role, created_at
            "#,
        )
        .bind(normalize_email(email))
        .bind(name)
        .bind(password_hash)
        .bind(UserRole::Admin)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count_judges(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(UserRole::Judge)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// Find the user with `email`, creating a judge account if there is none.
///
/// A single upsert under the unique email key, so concurrent invites for a
/// new address end up with one user. An existing name is never replaced.
pub async fn find_or_create_judge(
    conn: &mut PgConnection,
    email: &str,
    name: Option<&str>,
    password_hash: &str,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email)
        DO UPDATE SET name = COALESCE(users.name, EXCLUDED.name)
        RETURNING user_id, email, name, password_hash, role, created_at
        "#,
    )
    .bind(normalize_email(email))
    .bind(name.map(str::trim).filter(|n| !n.is_empty()))
    .bind(password_hash)
    .bind(UserRole::Judge)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Grace.Hopper@Example.COM "), "grace.hopper@example.com");
    }
}
