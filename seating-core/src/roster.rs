//! Confirmed-guest roster, indexed by table assignment.

use std::collections::HashMap;

use crate::chart::{Guest, GuestId};

/// Confirmed guests in stable list order, grouped by assigned table number.
///
/// The roster is a read-only snapshot: the guest directory owns the guests,
/// the seating view rebuilds the roster whenever assignments change.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    guests: Vec<Guest>,
    by_table: HashMap<u32, Vec<usize>>,
}

impl Roster {
    /// Build a roster from an ordered list of confirmed guests.
    ///
    /// Guests keep their list order both globally and within each table
    /// group; that order is what the polar layout indexes by.
    #[must_use]
    pub fn new(guests: Vec<Guest>) -> Self {
        let mut by_table: HashMap<u32, Vec<usize>> = HashMap::new();
        for (index, guest) in guests.iter().enumerate() {
            if let Some(number) = guest.table_number {
                by_table.entry(number).or_default().push(index);
            }
        }
        Self { guests, by_table }
    }

    /// All guests in the roster, in list order.
    #[must_use]
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Look up a guest by identity.
    #[must_use]
    pub fn guest(&self, id: GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == id)
    }

    /// Guests assigned to the given table number, in list order.
    #[must_use]
    pub fn at_table(&self, number: u32) -> Vec<&Guest> {
        self.by_table.get(&number).map_or_else(Vec::new, |indices| {
            indices.iter().map(|&i| &self.guests[i]).collect()
        })
    }

    /// Number of guests seated at any table.
    #[must_use]
    pub fn seated_count(&self) -> usize {
        self.by_table.values().map(Vec::len).sum()
    }

    /// Total number of guests in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RsvpStatus;

    fn guest(id: u32, name: &str, table: Option<u32>, plus_one: bool) -> Guest {
        Guest {
            id: GuestId::new(id),
            name: name.to_string(),
            plus_one,
            rsvp_status: RsvpStatus::Confirmed,
            table_number: table,
        }
    }

    #[test]
    fn test_groups_by_table_preserving_order() {
        let roster = Roster::new(vec![
            guest(1, "Ann", Some(1), false),
            guest(2, "Bo", Some(2), true),
            guest(3, "Cy", Some(1), false),
            guest(4, "Di", None, false),
        ]);

        let table_one: Vec<&str> = roster
            .at_table(1)
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(table_one, vec!["Ann", "Cy"]);
        assert_eq!(roster.at_table(2).len(), 1);
        assert!(roster.at_table(9).is_empty());
        assert_eq!(roster.seated_count(), 3);
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_guest_lookup() {
        let roster = Roster::new(vec![guest(5, "Eve", None, false)]);
        assert_eq!(roster.guest(GuestId::new(5)).expect("guest").name, "Eve");
        assert!(roster.guest(GuestId::new(6)).is_none());
    }
}
