//! HTTP API handlers for wedlist-server
//!
//! Protected routers are assembled here and wrapped in [`auth::require_user`]
//! by [`crate::build_router`]; the health and RSVP routers are public.

pub mod auth;
pub mod categories;
pub mod communications;
pub mod guests;
pub mod health;
pub mod rsvp;
pub mod upload;
pub mod weddings;

pub use auth::{auth_routes, require_user, CurrentUser};
pub use categories::category_routes;
pub use communications::communication_routes;
pub use guests::guest_routes;
pub use health::health_routes;
pub use rsvp::rsvp_routes;
pub use upload::upload_routes;
pub use weddings::wedding_routes;
