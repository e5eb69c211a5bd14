//! Ticket persistence.
//!
//! A [`TicketStore`] maps some durable medium to a [`TicketDocument`]. The
//! service only ever loads the whole document and saves it back, so any
//! backend that can do that (a file, an embedded key-value store, memory)
//! fits behind the same trait.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{HelpdeskError, Result};
use crate::json;
use crate::model::{TicketDocument, now_ms};

/// Durable home of the ticket document.
pub trait TicketStore: Send {
    /// Load the full document.
    ///
    /// A missing or corrupt backing store is reset to seed content, written,
    /// and returned. A second failure after that reset is fatal.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnrecoverable` if the store cannot be read even after
    /// a reset, or `Io` if the reset itself cannot be written.
    fn load(&mut self) -> Result<TicketDocument>;

    /// Persist the full document.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the write cannot complete.
    fn save(&mut self, doc: &TicketDocument) -> Result<()>;

    /// Reset the store to seed content and return it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the seed content cannot be written.
    fn repair(&mut self) -> Result<TicketDocument> {
        let seed = TicketDocument::seed(now_ms());
        self.save(&seed)?;
        Ok(seed)
    }
}

impl<T: TicketStore + ?Sized> TicketStore for Box<T> {
    fn load(&mut self) -> Result<TicketDocument> {
        (**self).load()
    }

    fn save(&mut self, doc: &TicketDocument) -> Result<()> {
        (**self).save(doc)
    }

    fn repair(&mut self) -> Result<TicketDocument> {
        (**self).repair()
    }
}

/// Outcome of the startup check on a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreHealth {
    /// The existing file parsed; nothing was written.
    Valid,
    /// The file was missing or corrupt and has been reset to seed content.
    Repaired,
}

/// Store backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the file parses, repairing it if it does not.
    ///
    /// # Errors
    ///
    /// Returns `Io` if a repair is needed and cannot be written.
    pub fn ensure_initialized(&mut self) -> Result<StoreHealth> {
        match json::load(&self.path) {
            Ok(doc) => {
                info!(path = %self.path.display(), tickets = doc.len(), "valid data file exists");
                Ok(StoreHealth::Valid)
            }
            Err(err) => {
                info!(path = %self.path.display(), reason = %err, "creating initial data file");
                self.repair()?;
                Ok(StoreHealth::Repaired)
            }
        }
    }
}

impl TicketStore for JsonFileStore {
    fn load(&mut self) -> Result<TicketDocument> {
        let path = self.path.clone();
        let doc = load_with_recovery(&path, || json::load(&path), || self.repair().map(drop))?;
        debug!(path = %path.display(), tickets = doc.len(), "loaded ticket store");
        Ok(doc)
    }

    fn save(&mut self, doc: &TicketDocument) -> Result<()> {
        json::save(&self.path, doc).inspect_err(|err| {
            warn!(path = %self.path.display(), reason = %err, "failed to write ticket store");
        })?;
        debug!(path = %self.path.display(), tickets = doc.len(), "saved ticket store");
        Ok(())
    }
}

/// Read through `read`; on failure run `repair` once and read again.
///
/// A failure of the second read is `StoreUnrecoverable`. There is no
/// further retry.
fn load_with_recovery<R, P>(path: &Path, mut read: R, repair: P) -> Result<TicketDocument>
where
    R: FnMut() -> Result<TicketDocument>,
    P: FnOnce() -> Result<()>,
{
    match read() {
        Ok(doc) => Ok(doc),
        Err(err) => {
            warn!(
                path = %path.display(),
                reason = %err,
                "ticket store unreadable, resetting to seed content"
            );
            repair()?;
            read().map_err(|retry_err| HelpdeskError::StoreUnrecoverable {
                path: path.to_path_buf(),
                reason: retry_err.to_string(),
            })
        }
    }
}

/// In-memory store for tests and embedding. Not durable.
///
/// Starts absent, so the first `load` seeds it just like a missing file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Option<TicketDocument>,
    fail_writes: bool,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing content instead of seeding.
    #[must_use]
    pub fn with_document(doc: TicketDocument) -> Self {
        Self {
            doc: Some(doc),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail with an I/O error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    #[must_use]
    pub const fn document(&self) -> Option<&TicketDocument> {
        self.doc.as_ref()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl TicketStore for MemoryStore {
    fn load(&mut self) -> Result<TicketDocument> {
        if let Some(doc) = &self.doc {
            return Ok(doc.clone());
        }
        self.repair()
    }

    fn save(&mut self, doc: &TicketDocument) -> Result<()> {
        if self.fail_writes {
            return Err(HelpdeskError::Io(io::Error::other(
                "memory store configured to fail writes",
            )));
        }
        self.doc = Some(doc.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ticket;
    use std::cell::Cell;
    use std::fs;

    fn sample_doc() -> TicketDocument {
        TicketDocument {
            tickets: vec![Ticket {
                id: "t1".to_string(),
                name: "A".to_string(),
                description: "B".to_string(),
                status: false,
                created: 42,
            }],
        }
    }

    #[test]
    fn test_load_missing_file_seeds_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        let mut store = JsonFileStore::new(&path);

        let doc = store.load().unwrap();
        assert_eq!(doc.len(), 2);
        assert!(path.exists());
        assert_eq!(json::load(&path).unwrap(), doc);
    }

    #[test]
    fn test_load_corrupt_file_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        let doc = store.load().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tickets[0].id, "1");
        assert_eq!(doc.tickets[1].id, "2");
    }

    #[test]
    fn test_load_empty_file_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        fs::write(&path, "").unwrap();

        let doc = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_save_then_load_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tickets.json"));

        store.save(&sample_doc()).unwrap();
        let first = store.load().unwrap();
        store.save(&first).unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, sample_doc());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_location_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a parent directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut store = JsonFileStore::new(blocker.join("tickets.json"));

        assert!(matches!(store.load(), Err(HelpdeskError::Io(_))));
        assert!(matches!(
            store.save(&sample_doc()),
            Err(HelpdeskError::Io(_))
        ));
    }

    #[test]
    fn test_ensure_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        let mut store = JsonFileStore::new(&path);

        assert_eq!(store.ensure_initialized().unwrap(), StoreHealth::Repaired);
        assert_eq!(store.ensure_initialized().unwrap(), StoreHealth::Valid);

        fs::write(&path, "   ").unwrap();
        assert_eq!(store.ensure_initialized().unwrap(), StoreHealth::Repaired);
    }

    #[test]
    fn test_repair_overwrites_valid_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("tickets.json"));
        store.save(&sample_doc()).unwrap();

        let doc = store.repair().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn test_second_read_failure_is_unrecoverable() {
        let reads = Cell::new(0);
        let repairs = Cell::new(0);
        let result = load_with_recovery(
            Path::new("tickets.json"),
            || {
                reads.set(reads.get() + 1);
                Err(HelpdeskError::Storage("still unreadable".to_string()))
            },
            || {
                repairs.set(repairs.get() + 1);
                Ok(())
            },
        );

        assert!(matches!(
            result,
            Err(HelpdeskError::StoreUnrecoverable { ref reason, .. }) if reason.contains("still unreadable")
        ));
        assert_eq!(reads.get(), 2);
        assert_eq!(repairs.get(), 1);
    }

    #[test]
    fn test_recovery_read_after_repair_succeeds() {
        let reads = Cell::new(0);
        let doc = load_with_recovery(
            Path::new("tickets.json"),
            || {
                reads.set(reads.get() + 1);
                if reads.get() == 1 {
                    Err(HelpdeskError::Storage("empty".to_string()))
                } else {
                    Ok(sample_doc())
                }
            },
            || Ok(()),
        )
        .unwrap();
        assert_eq!(doc, sample_doc());
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn test_failed_repair_skips_second_read() {
        let reads = Cell::new(0);
        let result = load_with_recovery(
            Path::new("tickets.json"),
            || {
                reads.set(reads.get() + 1);
                Err(HelpdeskError::Storage("empty".to_string()))
            },
            || Err(HelpdeskError::Io(io::Error::other("read-only"))),
        );
        assert!(matches!(result, Err(HelpdeskError::Io(_))));
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn test_memory_store_seeds_when_absent() {
        let mut store = MemoryStore::new();
        assert!(store.document().is_none());
        let doc = store.load().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(store.document(), Some(&doc));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let mut store = MemoryStore::with_document(sample_doc());
        store.set_fail_writes(true);
        assert!(matches!(
            store.save(&TicketDocument::default()),
            Err(HelpdeskError::Io(_))
        ));
        assert_eq!(store.load().unwrap(), sample_doc());
    }
}
