//! Input types for ticket mutations.

/// Fields for a new ticket.
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl NewTicket {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Fields to merge into an existing ticket.
///
/// `name` and `description` are skipped when absent *or empty*, so a client
/// cannot blank them through an update. `status` is skipped only when absent;
/// `Some(false)` reopens the ticket.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl TicketUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_empty(self.name.as_deref()).is_none()
            && non_empty(self.description.as_deref()).is_none()
            && self.status.is_none()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_is_empty() {
        assert!(TicketUpdate::default().is_empty());
        assert!(
            TicketUpdate {
                name: Some(String::new()),
                description: Some(String::new()),
                status: None,
            }
            .is_empty()
        );
        assert!(
            !TicketUpdate {
                status: Some(false),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
