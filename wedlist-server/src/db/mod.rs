//! Ownership-scoped repository
//!
//! All data access goes through [`Repository`]. Operations that touch a
//! wedding or anything nested under it take the caller's user id and verify
//! `wedding.user_id == owner` first. A failed check is reported exactly like
//! a missing row (`Error::NotFound`), so callers cannot probe for other
//! users' weddings.
//!
//! The only unscoped lookups are the public RSVP ones, keyed by RSVP code.

use sqlx::SqlitePool;

mod categories;
mod communications;
mod guests;
mod rsvp;
mod users;
mod weddings;

/// Data-access facade over the SQLite pool
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
