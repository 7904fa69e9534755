//! Guest categories, scoped through their wedding's owner

use chrono::Utc;
use tracing::info;
use wedlist_common::db::{CategoryPatch, GuestCategory, NewCategory};
use wedlist_common::{Error, Result};

use super::Repository;

impl Repository {
    pub async fn create_category(
        &self,
        owner: &str,
        wedding_id: i64,
        new: &NewCategory,
    ) -> Result<GuestCategory> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;
        new.validate()?;

        let category = sqlx::query_as::<_, GuestCategory>(
            r#"
            INSERT INTO guest_categories (wedding_id, name, color, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(wedding.id)
        .bind(new.name.trim())
        .bind(new.color_or_default())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list_categories(&self, owner: &str, wedding_id: i64) -> Result<Vec<GuestCategory>> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;

        let categories = sqlx::query_as::<_, GuestCategory>(
            "SELECT * FROM guest_categories WHERE wedding_id = ? ORDER BY id",
        )
        .bind(wedding.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// The category, provided its wedding belongs to `owner`
    pub async fn owned_category(&self, owner: &str, id: i64) -> Result<GuestCategory> {
        let category = sqlx::query_as::<_, GuestCategory>("SELECT * FROM guest_categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("Category"))?;

        match self.owned_wedding(owner, category.wedding_id).await {
            Ok(_) => Ok(category),
            Err(Error::NotFound(_)) => Err(Error::not_found("Category")),
            Err(e) => Err(e),
        }
    }

    pub async fn update_category(
        &self,
        owner: &str,
        id: i64,
        patch: CategoryPatch,
    ) -> Result<GuestCategory> {
        let mut category = self.owned_category(owner, id).await?;
        patch.apply_to(&mut category)?;

        let updated = sqlx::query_as::<_, GuestCategory>(
            "UPDATE guest_categories SET name = ?, color = ? WHERE id = ? RETURNING *",
        )
        .bind(&category.name)
        .bind(&category.color)
        .bind(category.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a category; its guests stay, uncategorized
    pub async fn delete_category(&self, owner: &str, id: i64) -> Result<()> {
        let category = self.owned_category(owner, id).await?;

        sqlx::query("DELETE FROM guest_categories WHERE id = ?")
            .bind(category.id)
            .execute(&self.pool)
            .await?;

        info!(
            "Deleted category {} from wedding {}",
            category.id, category.wedding_id
        );
        Ok(())
    }
}
