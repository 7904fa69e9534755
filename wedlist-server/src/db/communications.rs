//! Communication log: a record of messages sent to guests
//!
//! Nothing in the service sends messages; the log is written by whatever
//! does, and read back by the wedding's owner.

use chrono::Utc;
use wedlist_common::db::{CommunicationLog, NewCommunicationLog};
use wedlist_common::{Error, Result};

use super::Repository;

impl Repository {
    pub async fn log_communication(
        &self,
        owner: &str,
        wedding_id: i64,
        entry: &NewCommunicationLog,
    ) -> Result<CommunicationLog> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;

        if entry.message.trim().is_empty() {
            return Err(Error::validation("message is required"));
        }
        if let Some(guest_id) = entry.guest_id {
            match self.find_guest(guest_id).await? {
                Some(guest) if guest.wedding_id == wedding.id => {}
                _ => {
                    return Err(Error::validation(format!(
                        "guestId {} does not belong to this wedding",
                        guest_id
                    )))
                }
            }
        }

        let log = sqlx::query_as::<_, CommunicationLog>(
            r#"
            INSERT INTO communication_logs (wedding_id, guest_id, type, subject, message, status, sent_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(wedding.id)
        .bind(entry.guest_id)
        .bind(entry.kind)
        .bind(&entry.subject)
        .bind(&entry.message)
        .bind(entry.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    /// Log entries for one of the owner's weddings, newest first
    pub async fn list_communications(
        &self,
        owner: &str,
        wedding_id: i64,
    ) -> Result<Vec<CommunicationLog>> {
        let wedding = self.owned_wedding(owner, wedding_id).await?;

        let logs = sqlx::query_as::<_, CommunicationLog>(
            "SELECT * FROM communication_logs WHERE wedding_id = ? ORDER BY sent_at DESC, id DESC",
        )
        .bind(wedding.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
