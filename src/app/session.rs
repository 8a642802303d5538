//! Selection generations for background fetches.
//!
//! Every anchor-date change starts a new generation. Work spawned for an older
//! generation may still finish, but its results are dropped on arrival so they
//! cannot overwrite what was computed for the newer selection.

use chrono::NaiveDate;

/// Identifies the selection a piece of background work was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    anchor: NaiveDate,
}

impl Ticket {
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }
}

#[derive(Debug, Default)]
pub struct SelectionGuard {
    generation: u64,
    current: Option<Ticket>,
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, invalidating every earlier ticket.
    pub fn begin(&mut self, anchor: NaiveDate) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = Ticket {
            generation: self.generation,
            anchor,
        };
        self.current = Some(ticket);
        ticket
    }

    /// `true` if results produced under `ticket` still belong on screen.
    pub fn accepts(&self, ticket: &Ticket) -> bool {
        self.current.as_ref() == Some(ticket)
    }
}
