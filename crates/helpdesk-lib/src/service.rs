//! Validated CRUD over a [`TicketStore`].
//!
//! Every operation runs one load → mutate → save cycle while holding the
//! store mutex, so cycles inside one process never interleave. Mutations are
//! computed on the loaded copy and only written once they have fully
//! succeeded; a failed operation never reaches `save`.

use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::error::{HelpdeskError, Result};
use crate::model::{Ticket, TicketDocument, TicketSummary, now_ms};
use crate::query::{NewTicket, TicketUpdate, non_empty};
use crate::store::TicketStore;
use crate::util::generate_id;

/// Ticket operations over a shared store.
pub struct TicketService<S> {
    store: Mutex<S>,
}

impl<S: TicketStore> TicketService<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Consume the service and hand back its store.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if a previous operation panicked while holding the lock.
    pub fn into_store(self) -> Result<S> {
        self.store.into_inner().map_err(|_| poisoned())
    }

    /// All tickets without descriptions, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be loaded.
    pub fn list_summaries(&self) -> Result<Vec<TicketSummary>> {
        let doc = self.lock()?.load()?;
        Ok(doc.summaries())
    }

    /// Fetch one full ticket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, `TicketNotFound` if no ticket
    /// has that id, or a storage error.
    pub fn get_by_id(&self, id: &str) -> Result<Ticket> {
        require_id(id)?;
        let doc = self.lock()?.load()?;
        doc.get(id).cloned().ok_or_else(|| HelpdeskError::not_found(id))
    }

    /// Create and persist a ticket with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is absent or empty, or a storage error.
    pub fn create(&self, new: NewTicket) -> Result<Ticket> {
        let name = match new.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(HelpdeskError::invalid_input("name", "is required")),
        };

        let ticket = self.mutate(|doc| {
            let ticket = Ticket {
                id: generate_id(|id| doc.contains(id)),
                name,
                description: new.description.unwrap_or_default(),
                status: new.status.unwrap_or(false),
                created: now_ms(),
            };
            doc.tickets.push(ticket.clone());
            Ok(ticket)
        })?;

        info!(id = %ticket.id, name = %ticket.name, "created ticket");
        Ok(ticket)
    }

    /// Merge `update` into an existing ticket.
    ///
    /// See [`TicketUpdate`] for which fields are applied. An update with
    /// nothing to apply returns the ticket without writing the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, `TicketNotFound` if absent,
    /// or a storage error.
    pub fn update(&self, id: &str, update: TicketUpdate) -> Result<Ticket> {
        require_id(id)?;
        if update.is_empty() {
            return self.get_by_id(id);
        }
        let ticket = self.mutate(|doc| {
            let ticket = find_mut(doc, id)?;
            if let Some(name) = non_empty(update.name.as_deref()) {
                ticket.name = name.to_string();
            }
            if let Some(description) = non_empty(update.description.as_deref()) {
                ticket.description = description.to_string();
            }
            if let Some(status) = update.status {
                ticket.status = status;
            }
            Ok(ticket.clone())
        })?;

        info!(id = %ticket.id, status = ticket.status, "updated ticket");
        Ok(ticket)
    }

    /// Remove a ticket.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty id, `TicketNotFound` if absent,
    /// or a storage error.
    pub fn delete(&self, id: &str) -> Result<()> {
        require_id(id)?;
        self.mutate(|doc| {
            doc.remove(id)
                .map(|_| ())
                .ok_or_else(|| HelpdeskError::not_found(id))
        })?;

        info!(id, "deleted ticket");
        Ok(())
    }

    /// Overwrite a ticket's status.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is empty or `status` is absent,
    /// `TicketNotFound` if absent, or a storage error.
    pub fn set_status(&self, id: &str, status: Option<bool>) -> Result<Ticket> {
        require_id(id)?;
        let status = status.ok_or_else(|| HelpdeskError::invalid_input("status", "is required"))?;
        let ticket = self.mutate(|doc| {
            let ticket = find_mut(doc, id)?;
            ticket.status = status;
            Ok(ticket.clone())
        })?;

        info!(id = %ticket.id, status, "changed ticket status");
        Ok(ticket)
    }

    /// Reset the store to its seed content.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the seed content cannot be written.
    pub fn reset(&self) -> Result<TicketDocument> {
        let doc = self.lock()?.repair()?;
        info!(tickets = doc.len(), "reset ticket store to seed content");
        Ok(doc)
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut TicketDocument) -> Result<T>) -> Result<T> {
        let mut store = self.lock()?;
        let mut doc = store.load()?;
        let out = f(&mut doc)?;
        store.save(&doc)?;
        Ok(out)
    }

    fn lock(&self) -> Result<MutexGuard<'_, S>> {
        self.store.lock().map_err(|_| poisoned())
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(HelpdeskError::invalid_input("id", "is required"));
    }
    Ok(())
}

fn find_mut<'a>(doc: &'a mut TicketDocument, id: &str) -> Result<&'a mut Ticket> {
    doc.get_mut(id).ok_or_else(|| HelpdeskError::not_found(id))
}

fn poisoned() -> HelpdeskError {
    HelpdeskError::Storage("ticket store lock poisoned".to_string())
}
