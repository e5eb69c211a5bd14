//! Output formatting for `helpdesk`.
//!
//! Plain text for terminals; the `--json` flags bypass this module and print
//! the serde form directly.

mod text;

pub use text::{
    format_created, format_status_icon, format_status_label, format_summary_line,
    format_ticket_details,
};
