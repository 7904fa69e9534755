//! Users, as handed over by the upstream authentication layer

use chrono::Utc;
use wedlist_common::db::{User, UserIdentity};
use wedlist_common::Result;

use super::Repository;

impl Repository {
    /// Insert the user, or refresh the profile fields that were supplied
    pub async fn upsert_user(&self, identity: &UserIdentity) -> Result<User> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = COALESCE(excluded.email, users.email),
                first_name = COALESCE(excluded.first_name, users.first_name),
                last_name = COALESCE(excluded.last_name, users.last_name),
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
