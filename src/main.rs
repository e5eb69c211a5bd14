//! `helpdesk` - Minimal helpdesk ticketing backend
//!
//! Serves the ticket API over HTTP and stores every ticket in one JSON file.

use helpdesk::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
