//! Database models
//!
//! Row types map one-to-one onto the tables created in [`super::init`].
//! Every model serializes with camelCase field names, which is the shape the
//! HTTP API exposes.
//!
//! Inputs come in two flavours: `New*` structs carry everything needed for an
//! INSERT, `*Patch` structs carry a partial update that is applied to a row
//! already read from the database (read-modify-write).

use crate::rsvp_code;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Default category color (gold)
pub const DEFAULT_CATEGORY_COLOR: &str = "#D4AF37";

/// Categories seeded into every new wedding: (name, color)
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Wedding Party", "#9333EA"),
    ("Family", "#DC2626"),
    ("Friends", "#2563EB"),
    ("Colleagues", "#059669"),
];

// ========================================
// Enumerations
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum WeddingStatus {
    #[default]
    Active,
    Draft,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

/// Channel a communication was sent over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CommunicationType {
    Email,
    Sms,
    Whatsapp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CommunicationStatus {
    #[default]
    Sent,
    Delivered,
    Failed,
    Bounced,
}

// ========================================
// Rows
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Wedding {
    pub id: i64,
    pub user_id: String,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: NaiveDate,
    pub venue: String,
    pub venue_address: Option<String>,
    pub description: Option<String>,
    pub status: WeddingStatus,
    pub rsvp_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GuestCategory {
    pub id: i64,
    pub wedding_id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub wedding_id: i64,
    pub category_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub guest_count: i64,
    pub dietary_restrictions: Option<String>,
    pub notes: Option<String>,
    pub invitation_sent: bool,
    pub invitation_sent_at: Option<DateTime<Utc>>,
    pub rsvp_submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLog {
    pub id: i64,
    pub wedding_id: i64,
    pub guest_id: Option<i64>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: CommunicationType,
    pub subject: Option<String>,
    pub message: String,
    pub status: CommunicationStatus,
    pub sent_at: DateTime<Utc>,
}

/// The part of a wedding that the public RSVP page may show
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingPublicView {
    pub id: i64,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: NaiveDate,
    pub venue: String,
    pub venue_address: Option<String>,
    pub description: Option<String>,
}

impl From<&Wedding> for WeddingPublicView {
    fn from(wedding: &Wedding) -> Self {
        Self {
            id: wedding.id,
            bride_name: wedding.bride_name.clone(),
            groom_name: wedding.groom_name.clone(),
            wedding_date: wedding.wedding_date,
            venue: wedding.venue.clone(),
            venue_address: wedding.venue_address.clone(),
            description: wedding.description.clone(),
        }
    }
}

// ========================================
// Inputs
// ========================================

/// Identity handed over by the upstream authentication layer
#[derive(Debug, Clone, Default)]
pub struct UserIdentity {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWedding {
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: NaiveDate,
    pub venue: String,
    #[serde(default)]
    pub venue_address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: WeddingStatus,
}

impl NewWedding {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("brideName", &self.bride_name)?;
        require_non_empty("groomName", &self.groom_name)?;
        require_non_empty("venue", &self.venue)?;
        require_code_segment("brideName", &self.bride_name)?;
        require_code_segment("groomName", &self.groom_name)?;
        Ok(())
    }
}

/// Partial wedding update. `rsvpCode` and `userId` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WeddingPatch {
    pub bride_name: Option<String>,
    pub groom_name: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub venue_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<WeddingStatus>,
}

impl WeddingPatch {
    /// Apply onto a wedding row, validating the result
    pub fn apply_to(self, wedding: &mut Wedding) -> Result<()> {
        if let Some(v) = self.bride_name {
            require_non_empty("brideName", &v)?;
            wedding.bride_name = v;
        }
        if let Some(v) = self.groom_name {
            require_non_empty("groomName", &v)?;
            wedding.groom_name = v;
        }
        if let Some(v) = self.wedding_date {
            wedding.wedding_date = v;
        }
        if let Some(v) = self.venue {
            require_non_empty("venue", &v)?;
            wedding.venue = v;
        }
        if let Some(v) = self.venue_address {
            wedding.venue_address = v;
        }
        if let Some(v) = self.description {
            wedding.description = v;
        }
        if let Some(v) = self.status {
            wedding.status = v;
        }
        Ok(())
    }
}

/// A guest ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub wedding_id: i64,
    pub category_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub guest_count: i64,
    pub dietary_restrictions: Option<String>,
    pub invitation_sent: bool,
}

impl NewGuest {
    /// Minimal guest with defaults for everything optional
    pub fn new(
        wedding_id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            wedding_id,
            category_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: None,
            address: None,
            notes: None,
            rsvp_status: RsvpStatus::Pending,
            guest_count: 1,
            dietary_restrictions: None,
            invitation_sent: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_empty("firstName", &self.first_name)?;
        require_non_empty("lastName", &self.last_name)?;
        require_non_empty("phone", &self.phone)?;
        require_guest_count(self.guest_count)?;
        Ok(())
    }
}

/// Guest creation request body (the wedding id comes from the URL)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    #[serde(default = "default_guest_count")]
    pub guest_count: i64,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub invitation_sent: bool,
}

impl GuestInput {
    pub fn into_new_guest(self, wedding_id: i64) -> NewGuest {
        NewGuest {
            wedding_id,
            category_id: self.category_id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            notes: self.notes,
            rsvp_status: self.rsvp_status,
            guest_count: self.guest_count,
            dietary_restrictions: self.dietary_restrictions,
            invitation_sent: self.invitation_sent,
        }
    }
}

/// Partial guest update. `weddingId` and `rsvpSubmittedAt` are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GuestPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i64>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    pub rsvp_status: Option<RsvpStatus>,
    pub guest_count: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub dietary_restrictions: Option<Option<String>>,
    pub invitation_sent: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub invitation_sent_at: Option<Option<DateTime<Utc>>>,
}

impl GuestPatch {
    pub fn apply_to(self, guest: &mut Guest) -> Result<()> {
        if let Some(v) = self.category_id {
            guest.category_id = v;
        }
        if let Some(v) = self.first_name {
            require_non_empty("firstName", &v)?;
            guest.first_name = v;
        }
        if let Some(v) = self.last_name {
            require_non_empty("lastName", &v)?;
            guest.last_name = v;
        }
        if let Some(v) = self.phone {
            require_non_empty("phone", &v)?;
            guest.phone = v;
        }
        if let Some(v) = self.email {
            guest.email = v;
        }
        if let Some(v) = self.address {
            guest.address = v;
        }
        if let Some(v) = self.notes {
            guest.notes = v;
        }
        if let Some(v) = self.rsvp_status {
            guest.rsvp_status = v;
        }
        if let Some(v) = self.guest_count {
            require_guest_count(v)?;
            guest.guest_count = v;
        }
        if let Some(v) = self.dietary_restrictions {
            guest.dietary_restrictions = v;
        }
        if let Some(v) = self.invitation_sent {
            guest.invitation_sent = v;
        }
        if let Some(v) = self.invitation_sent_at {
            guest.invitation_sent_at = v;
        }
        Ok(())
    }
}

/// Body of the public RSVP submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub guest_id: i64,
    pub rsvp_status: RsvpStatus,
    #[serde(default)]
    pub guest_count: Option<i64>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
}

impl RsvpSubmission {
    /// Party size to record; omitted means a single guest
    pub fn party_size(&self) -> Result<i64> {
        let count = self.guest_count.unwrap_or(1);
        require_guest_count(count)?;
        Ok(count)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)?;
        if let Some(color) = &self.color {
            require_hex_color(color)?;
        }
        Ok(())
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn apply_to(self, category: &mut GuestCategory) -> Result<()> {
        if let Some(v) = self.name {
            require_non_empty("name", &v)?;
            category.name = v;
        }
        if let Some(v) = self.color {
            require_hex_color(&v)?;
            category.color = v;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunicationLog {
    #[serde(default)]
    pub guest_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: CommunicationStatus,
}

// ========================================
// Helpers
// ========================================

fn default_guest_count() -> i64 {
    1
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// The name must contribute something to the RSVP code
fn require_code_segment(field: &str, value: &str) -> Result<()> {
    if rsvp_code::slug(value).is_empty() {
        return Err(Error::validation(format!(
            "{} must contain at least one letter or digit",
            field
        )));
    }
    Ok(())
}

fn require_guest_count(count: i64) -> Result<()> {
    if count < 1 {
        return Err(Error::validation(format!(
            "guestCount must be at least 1, got {}",
            count
        )));
    }
    Ok(())
}

fn require_hex_color(color: &str) -> Result<()> {
    let valid = color
        .strip_prefix('#')
        .map(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);

    if !valid {
        return Err(Error::validation(format!(
            "color must be a hex value like #D4AF37, got '{}'",
            color
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_guest() -> Guest {
        let now = Utc::now();
        Guest {
            id: 7,
            wedding_id: 1,
            category_id: Some(3),
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            email: Some("emily@example.com".to_string()),
            phone: "5551234567".to_string(),
            address: None,
            rsvp_status: RsvpStatus::Pending,
            guest_count: 1,
            dietary_restrictions: None,
            notes: None,
            invitation_sent: false,
            invitation_sent_at: None,
            rsvp_submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_guest_patch_distinguishes_null_from_absent() {
        let patch: GuestPatch =
            serde_json::from_str(r#"{"email": null, "lastName": "Smith"}"#).unwrap();
        let mut guest = sample_guest();
        patch.apply_to(&mut guest).unwrap();

        assert_eq!(guest.email, None);
        assert_eq!(guest.last_name, "Smith");
        // Absent fields untouched
        assert_eq!(guest.category_id, Some(3));
        assert_eq!(guest.first_name, "Emily");
    }

    #[test]
    fn test_guest_patch_rejects_zero_guest_count() {
        let patch = GuestPatch {
            guest_count: Some(0),
            ..Default::default()
        };
        let mut guest = sample_guest();
        assert!(matches!(patch.apply_to(&mut guest), Err(Error::Validation(_))));
    }

    #[test]
    fn test_guest_patch_rejects_wedding_id() {
        let result = serde_json::from_str::<GuestPatch>(r#"{"weddingId": 99}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_guest_requires_phone() {
        let guest = NewGuest::new(1, "Emily", "Johnson", "   ");
        assert!(matches!(guest.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_guest_input_defaults() {
        let input: GuestInput = serde_json::from_str(
            r#"{"firstName": "Emily", "lastName": "Johnson", "phone": "5551234567"}"#,
        )
        .unwrap();
        let guest = input.into_new_guest(4);

        assert_eq!(guest.wedding_id, 4);
        assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
        assert_eq!(guest.guest_count, 1);
        assert!(!guest.invitation_sent);
    }

    #[test]
    fn test_rsvp_submission_party_size() {
        let submission: RsvpSubmission =
            serde_json::from_str(r#"{"guestId": 1, "rsvpStatus": "confirmed"}"#).unwrap();
        assert_eq!(submission.party_size().unwrap(), 1);

        let submission: RsvpSubmission = serde_json::from_str(
            r#"{"guestId": 1, "rsvpStatus": "declined", "guestCount": 0}"#,
        )
        .unwrap();
        assert!(submission.party_size().is_err());
    }

    #[test]
    fn test_category_color_validation() {
        let ok = NewCategory {
            name: "Neighbours".to_string(),
            color: Some("#abc".to_string()),
        };
        assert!(ok.validate().is_ok());

        let bad = NewCategory {
            name: "Neighbours".to_string(),
            color: Some("gold".to_string()),
        };
        assert!(bad.validate().is_err());

        let defaulted = NewCategory {
            name: "Neighbours".to_string(),
            color: None,
        };
        assert_eq!(defaulted.color_or_default(), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_new_wedding_names_need_a_letter_or_digit() {
        let wedding: NewWedding = serde_json::from_str(
            r#"{"brideName": "!!!", "groomName": "Michael", "weddingDate": "2025-06-01", "venue": "Rose Garden"}"#,
        )
        .unwrap();

        match wedding.validate() {
            Err(Error::Validation(message)) => assert!(message.contains("brideName"), "{}", message),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_wedding_status_serializes_lowercase() {
        let json = serde_json::to_string(&WeddingStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
