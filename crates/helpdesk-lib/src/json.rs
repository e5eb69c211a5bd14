//! JSON file I/O for the ticket document.
//!
//! The whole store is one pretty-printed JSON object. Writes go through a
//! sibling temp file and a rename so readers never see a torn document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{HelpdeskError, Result};
use crate::model::TicketDocument;

/// Load the ticket document from a JSON file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `Storage` if it is empty or
/// whitespace-only, or `Json` if it does not parse as a ticket document.
pub fn load(path: &Path) -> Result<TicketDocument> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(HelpdeskError::Storage(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(serde_json::from_str(&content)?)
}

/// Save the ticket document with an atomic write.
///
/// The temp file is synced before the rename and removed if either step
/// fails. Missing parent directories are created.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save(path: &Path, doc: &TicketDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(doc)?;

    let tmp_path = path.with_extension("json.tmp");
    let written =
        write_synced(&tmp_path, json.as_bytes()).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.write_all(b"\n")?;
    file.sync_all()
}
