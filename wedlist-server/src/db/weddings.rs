//! Weddings: creation with RSVP code and seeded categories, owner-scoped
//! reads and updates, RSVP statistics

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, info};
use wedlist_common::db::{NewWedding, Wedding, WeddingPatch, DEFAULT_CATEGORIES};
use wedlist_common::rsvp_code;
use wedlist_common::stats::WeddingStats;
use wedlist_common::{Error, Result};

use super::Repository;

impl Repository {
    /// Create a wedding for `owner`
    ///
    /// The RSVP code is generated from the couple's names and the wedding
    /// year; a taken code gets a numeric suffix. The wedding row and its four
    /// default categories are written in one transaction.
    pub async fn create_wedding(&self, owner: &str, new: &NewWedding) -> Result<Wedding> {
        new.validate()?;

        let base = rsvp_code::base_code(&new.bride_name, &new.groom_name, new.wedding_date);
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let code = unused_rsvp_code(&mut *tx, &base).await?;

        let wedding = sqlx::query_as::<_, Wedding>(
            r#"
            INSERT INTO weddings (
                user_id, bride_name, groom_name, wedding_date, venue,
                venue_address, description, status, rsvp_code,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(new.bride_name.trim())
        .bind(new.groom_name.trim())
        .bind(new.wedding_date)
        .bind(new.venue.trim())
        .bind(&new.venue_address)
        .bind(&new.description)
        .bind(new.status)
        .bind(&code)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for (name, color) in DEFAULT_CATEGORIES {
            sqlx::query(
                "INSERT INTO guest_categories (wedding_id, name, color, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(wedding.id)
            .bind(name)
            .bind(color)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "Created wedding {} ({}) for user {}",
            wedding.id, wedding.rsvp_code, owner
        );
        Ok(wedding)
    }

    /// The owner's weddings, newest first
    pub async fn list_weddings(&self, owner: &str) -> Result<Vec<Wedding>> {
        let weddings = sqlx::query_as::<_, Wedding>(
            "SELECT * FROM weddings WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(weddings)
    }

    /// Unscoped lookup by id; callers outside the repository want [`Self::owned_wedding`]
    pub async fn find_wedding(&self, id: i64) -> Result<Option<Wedding>> {
        let wedding = sqlx::query_as::<_, Wedding>("SELECT * FROM weddings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(wedding)
    }

    /// The wedding, provided it belongs to `owner`
    pub async fn owned_wedding(&self, owner: &str, id: i64) -> Result<Wedding> {
        match self.find_wedding(id).await? {
            Some(wedding) if wedding.user_id == owner => Ok(wedding),
            Some(_) => {
                debug!("User {} denied access to wedding {}", owner, id);
                Err(Error::not_found("Wedding"))
            }
            None => Err(Error::not_found("Wedding")),
        }
    }

    pub async fn update_wedding(&self, owner: &str, id: i64, patch: WeddingPatch) -> Result<Wedding> {
        let mut wedding = self.owned_wedding(owner, id).await?;
        patch.apply_to(&mut wedding)?;

        let updated = sqlx::query_as::<_, Wedding>(
            r#"
            UPDATE weddings SET
                bride_name = ?, groom_name = ?, wedding_date = ?, venue = ?,
                venue_address = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&wedding.bride_name)
        .bind(&wedding.groom_name)
        .bind(wedding.wedding_date)
        .bind(&wedding.venue)
        .bind(&wedding.venue_address)
        .bind(&wedding.description)
        .bind(wedding.status)
        .bind(Utc::now())
        .bind(wedding.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Public lookup used by the RSVP flow; not scoped to any user
    pub async fn wedding_by_rsvp_code(&self, code: &str) -> Result<Option<Wedding>> {
        let wedding = sqlx::query_as::<_, Wedding>("SELECT * FROM weddings WHERE rsvp_code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(wedding)
    }

    /// Guest counts by RSVP status for one of the owner's weddings
    pub async fn wedding_stats(&self, owner: &str, wedding_id: i64) -> Result<WeddingStats> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;

        let (confirmed, pending, declined) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COALESCE(SUM(rsvp_status = 'confirmed'), 0),
                COALESCE(SUM(rsvp_status = 'pending'), 0),
                COALESCE(SUM(rsvp_status = 'declined'), 0)
            FROM guests
            WHERE wedding_id = ?
            "#,
        )
        .bind(wedding.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(WeddingStats::from_counts(confirmed, pending, declined))
    }
}

/// First free RSVP code derived from `base`
async fn unused_rsvp_code(conn: &mut SqliteConnection, base: &str) -> Result<String> {
    let mut attempt = 1;
    loop {
        let code = rsvp_code::candidate(base, attempt);
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weddings WHERE rsvp_code = ?")
            .bind(&code)
            .fetch_one(&mut *conn)
            .await?;

        if taken == 0 {
            if attempt > 1 {
                debug!("RSVP code {} taken, using {}", base, code);
            }
            return Ok(code);
        }
        attempt += 1;
    }
}
