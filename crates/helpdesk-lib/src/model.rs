//! Core data types for helpdesk-lib.
//!
//! The serde shape here is the on-disk format: a single JSON object with a
//! `tickets` array, each ticket carrying its creation time as milliseconds
//! since the Unix epoch.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Milliseconds in one day, used to backdate the second seed ticket.
pub const DAY_MS: i64 = 86_400_000;

/// Current time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// A single helpdesk issue record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `false` while open, `true` once done.
    #[serde(default)]
    pub status: bool,
    pub created: i64,
}

impl Ticket {
    /// Project to the list view, dropping the description.
    #[must_use]
    pub fn summary(&self) -> TicketSummary {
        TicketSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            status: self.status,
            created: self.created,
        }
    }
}

/// Ticket view used for list displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: String,
    pub name: String,
    pub status: bool,
    pub created: i64,
}

/// The whole store, read and written as one unit.
///
/// Ticket order is insertion order and is the only ordering the store has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDocument {
    pub tickets: Vec<Ticket>,
}

impl TicketDocument {
    /// The content a fresh or corrupt store is reset to.
    #[must_use]
    pub fn seed(now: i64) -> Self {
        Self {
            tickets: vec![
                Ticket {
                    id: "1".to_string(),
                    name: "Проблема с принтером".to_string(),
                    description: "Принтер не печатает документы".to_string(),
                    status: false,
                    created: now,
                },
                Ticket {
                    id: "2".to_string(),
                    name: "Обновить ПО".to_string(),
                    description: "Необходимо обновить Windows до последней версии".to_string(),
                    status: true,
                    created: now - DAY_MS,
                },
            ],
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| t.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tickets.iter().any(|t| t.id == id)
    }

    /// Remove a ticket, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Ticket> {
        let pos = self.tickets.iter().position(|t| t.id == id)?;
        Some(self.tickets.remove(pos))
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<TicketSummary> {
        self.tickets.iter().map(Ticket::summary).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
