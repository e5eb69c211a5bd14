//! `helpdesk-lib` - ticket store and service core.
//!
//! A single JSON document holds every ticket. The [`TicketService`] performs
//! each operation as one load → mutate → save cycle against any
//! [`TicketStore`] implementation.
//!
//! # Quick Start
//!
//! ```no_run
//! use helpdesk_lib::{JsonFileStore, NewTicket, TicketService, TicketUpdate};
//!
//! let service = TicketService::new(JsonFileStore::new("tickets.json"));
//!
//! // Create
//! let ticket = service.create(NewTicket::named("Printer broken")).unwrap();
//!
//! // Update
//! service
//!     .update(&ticket.id, TicketUpdate { status: Some(true), ..Default::default() })
//!     .unwrap();
//!
//! // Query
//! for summary in service.list_summaries().unwrap() {
//!     println!("{} {}", summary.id, summary.name);
//! }
//! ```

pub mod error;
pub mod json;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
pub mod util;

pub use error::{HelpdeskError, Result};
pub use model::{Ticket, TicketDocument, TicketSummary};
pub use query::{NewTicket, TicketUpdate};
pub use service::TicketService;
pub use store::{JsonFileStore, MemoryStore, StoreHealth, TicketStore};
