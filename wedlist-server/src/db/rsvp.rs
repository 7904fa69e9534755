//! Public RSVP flow, keyed by RSVP code instead of caller identity

use chrono::Utc;
use tracing::info;
use wedlist_common::db::{Guest, RsvpSubmission, WeddingPublicView};
use wedlist_common::{Error, Result};

use super::Repository;

impl Repository {
    /// Public view of the wedding behind an RSVP code
    pub async fn rsvp_lookup(&self, code: &str) -> Result<WeddingPublicView> {
        let wedding = self
            .wedding_by_rsvp_code(code)
            .await?
            .ok_or_else(|| Error::not_found("Wedding"))?;

        Ok(WeddingPublicView::from(&wedding))
    }

    /// Record a guest's answer
    ///
    /// The guest is identified only by the id the client sends; it must
    /// belong to the wedding behind `code`. Omitted dietary restrictions keep
    /// their stored value.
    pub async fn submit_rsvp(&self, code: &str, submission: &RsvpSubmission) -> Result<Guest> {
        let wedding = self
            .wedding_by_rsvp_code(code)
            .await?
            .ok_or_else(|| Error::not_found("Wedding"))?;

        let party_size = submission.party_size()?;

        match self.find_guest(submission.guest_id).await? {
            Some(guest) if guest.wedding_id == wedding.id => {}
            _ => return Err(Error::not_found("Guest")),
        }

        let now = Utc::now();
        let guest = sqlx::query_as::<_, Guest>(
            r#"
            UPDATE guests SET
                rsvp_status = ?,
                guest_count = ?,
                dietary_restrictions = COALESCE(?, dietary_restrictions),
                rsvp_submitted_at = ?,
                updated_at = ?
            WHERE id = ? AND wedding_id = ?
            RETURNING *
            "#,
        )
        .bind(submission.rsvp_status)
        .bind(party_size)
        .bind(&submission.dietary_restrictions)
        .bind(now)
        .bind(now)
        .bind(submission.guest_id)
        .bind(wedding.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("Guest"))?;

        info!(
            "RSVP for guest {} of wedding {}: {:?} x{}",
            guest.id, wedding.id, guest.rsvp_status, guest.guest_count
        );
        Ok(guest)
    }
}
