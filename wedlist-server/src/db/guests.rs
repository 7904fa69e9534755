//! Guests: single and bulk creation, owner-scoped reads, updates and deletes

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use tracing::{debug, info};
use wedlist_common::db::{Guest, GuestPatch, NewGuest, Wedding};
use wedlist_common::{Error, Result};

use super::Repository;

/// Rows per multi-row INSERT; keeps the bind count under SQLite's parameter limit
const INSERT_CHUNK_ROWS: usize = 500;

impl Repository {
    pub async fn create_guest(&self, owner: &str, wedding_id: i64, guest: NewGuest) -> Result<Guest> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;
        if guest.wedding_id != wedding.id {
            return Err(Error::validation("Guest belongs to a different wedding"));
        }
        guest.validate()?;

        let mut conn = self.pool.acquire().await?;
        ensure_category_in_wedding(&mut *conn, guest.category_id, wedding.id).await?;

        let mut created = insert_guest_rows(&mut *conn, std::slice::from_ref(&guest), Utc::now()).await?;
        created
            .pop()
            .ok_or_else(|| Error::Internal("INSERT returned no guest row".to_string()))
    }

    /// Insert many guests into a wedding the caller already holds
    ///
    /// Every guest is validated before anything is written; the inserts then
    /// run in a single transaction, so either all rows land or none do.
    pub async fn insert_guests(&self, wedding: &Wedding, guests: Vec<NewGuest>) -> Result<Vec<Guest>> {
        if guests.is_empty() {
            return Ok(Vec::new());
        }

        for guest in &guests {
            if guest.wedding_id != wedding.id {
                return Err(Error::validation("Guest belongs to a different wedding"));
            }
            guest.validate()?;
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let mut category_ids: Vec<i64> = guests.iter().filter_map(|g| g.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        for category_id in category_ids {
            ensure_category_in_wedding(&mut *tx, Some(category_id), wedding.id).await?;
        }

        let mut created = Vec::with_capacity(guests.len());
        for chunk in guests.chunks(INSERT_CHUNK_ROWS) {
            created.extend(insert_guest_rows(&mut *tx, chunk, now).await?);
        }

        tx.commit().await?;

        info!("Inserted {} guests into wedding {}", created.len(), wedding.id);
        Ok(created)
    }

    /// Bulk creation for one of the owner's weddings
    pub async fn create_guests(
        &self,
        owner: &str,
        wedding_id: i64,
        guests: Vec<NewGuest>,
    ) -> Result<Vec<Guest>> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;
        self.insert_guests(&wedding, guests).await
    }

    /// Guests of one of the owner's weddings, ordered by first then last name
    pub async fn list_guests(&self, owner: &str, wedding_id: i64) -> Result<Vec<Guest>> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;

        let guests = sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE wedding_id = ? ORDER BY first_name, last_name, id",
        )
        .bind(wedding.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Unscoped lookup by id
    pub async fn find_guest(&self, id: i64) -> Result<Option<Guest>> {
        let guest = sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(guest)
    }

    /// The guest, provided its wedding belongs to `owner`
    pub async fn owned_guest(&self, owner: &str, id: i64) -> Result<Guest> {
        let guest = self
            .find_guest(id)
            .await?
            .ok_or_else(|| Error::not_found("Guest"))?;

        // Same error whether the guest is missing or belongs to someone else
        match self.owned_wedding(owner, guest.wedding_id).await {
            Ok(_) => Ok(guest),
            Err(Error::NotFound(_)) => {
                debug!("User {} denied access to guest {}", owner, id);
                Err(Error::not_found("Guest"))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update_guest(&self, owner: &str, id: i64, patch: GuestPatch) -> Result<Guest> {
        let mut guest = self.owned_guest(owner, id).await?;
        patch.apply_to(&mut guest)?;

        let mut conn = self.pool.acquire().await?;
        ensure_category_in_wedding(&mut *conn, guest.category_id, guest.wedding_id).await?;

        let updated = sqlx::query_as::<_, Guest>(
            r#"
            UPDATE guests SET
                category_id = ?, first_name = ?, last_name = ?, email = ?, phone = ?,
                address = ?, rsvp_status = ?, guest_count = ?, dietary_restrictions = ?,
                notes = ?, invitation_sent = ?, invitation_sent_at = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(guest.category_id)
        .bind(&guest.first_name)
        .bind(&guest.last_name)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(&guest.address)
        .bind(guest.rsvp_status)
        .bind(guest.guest_count)
        .bind(&guest.dietary_restrictions)
        .bind(&guest.notes)
        .bind(guest.invitation_sent)
        .bind(guest.invitation_sent_at)
        .bind(Utc::now())
        .bind(guest.id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(updated)
    }

    pub async fn delete_guest(&self, owner: &str, id: i64) -> Result<()> {
        let guest = self.owned_guest(owner, id).await?;

        sqlx::query("DELETE FROM guests WHERE id = ?")
            .bind(guest.id)
            .execute(&self.pool)
            .await?;

        info!("Deleted guest {} from wedding {}", guest.id, guest.wedding_id);
        Ok(())
    }
}

/// A guest may only be filed under a category of its own wedding
async fn ensure_category_in_wedding(
    conn: &mut SqliteConnection,
    category_id: Option<i64>,
    wedding_id: i64,
) -> Result<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };

    let owner_wedding: Option<i64> =
        sqlx::query_scalar("SELECT wedding_id FROM guest_categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&mut *conn)
            .await?;

    if owner_wedding != Some(wedding_id) {
        return Err(Error::validation(format!(
            "categoryId {} does not belong to this wedding",
            category_id
        )));
    }
    Ok(())
}

/// One multi-row INSERT ... RETURNING for `guests`
async fn insert_guest_rows(
    conn: &mut SqliteConnection,
    guests: &[NewGuest],
    now: DateTime<Utc>,
) -> Result<Vec<Guest>> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT INTO guests (
            wedding_id, category_id, first_name, last_name, email, phone, address,
            rsvp_status, guest_count, dietary_restrictions, notes, invitation_sent,
            created_at, updated_at
        ) ",
    );

    builder.push_values(guests, |mut row, guest| {
        row.push_bind(guest.wedding_id)
            .push_bind(guest.category_id)
            .push_bind(guest.first_name.trim().to_string())
            .push_bind(guest.last_name.trim().to_string())
            .push_bind(guest.email.clone())
            .push_bind(guest.phone.trim().to_string())
            .push_bind(guest.address.clone())
            .push_bind(guest.rsvp_status)
            .push_bind(guest.guest_count)
            .push_bind(guest.dietary_restrictions.clone())
            .push_bind(guest.notes.clone())
            .push_bind(guest.invitation_sent)
            .push_bind(now)
            .push_bind(now);
    });
    builder.push(" RETURNING *");

    let rows = builder
        .build_query_as::<Guest>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows)
}
