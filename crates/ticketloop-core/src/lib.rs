//! Core domain for the ticketloop support backend.
//!
//! Provides strongly-typed domain models, input validation, the storage
//! layer, and the ticket lifecycle service. All other crates depend on
//! these foundational types for type safety and consistency.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod notify;
pub mod service;
pub mod storage;
pub mod validate;

pub use error::{CoreError, Result};
pub use models::{Contact, ContactId, Ticket, TicketId, TicketStatus, TicketWithContact};
pub use notify::{NoOpNotifier, TicketNotifier};
pub use service::TicketService;
pub use validate::TicketSubmission;
