//! Ticketloop HTTP API.
//!
//! Maps the ticket lifecycle operations onto transport endpoints and
//! translates domain results and errors into responses.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

use ticketloop_core::{storage::Storage, TicketService};

pub use config::Config;
pub use server::{create_router, start_server};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Ticket lifecycle service.
    pub service: TicketService,
    /// Storage handle for readiness checks.
    pub storage: Storage,
}

impl AppState {
    /// Creates application state from a service.
    pub fn new(service: TicketService) -> Self {
        let storage = service.storage().clone();
        Self { service, storage }
    }
}
