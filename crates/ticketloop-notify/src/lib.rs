//! Outbound webhook notification for the ticketloop backend.
//!
//! Implements the core [`ticketloop_core::TicketNotifier`] seam with a
//! reqwest-backed client. Fire-and-forget: failures are logged at this
//! boundary and never surfaced to the ticket service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{Notifier, NotifierConfig};
pub use error::{NotifyError, Result};
