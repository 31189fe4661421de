//! HTTP request handlers.

pub mod health;
pub mod tickets;

pub use health::{health_check, readiness_check};
pub use tickets::{create_ticket, list_tickets, resolve_ticket};
