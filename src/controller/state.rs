//! Shared desk state

use crate::backend::{Client, DashboardStats, Reservation, Room};
use crate::session::Session;

use super::View;

/// Last fetched copy of the backend collections.
///
/// Never patched locally: after any mutation the four collections are
/// fetched again from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub stats: DashboardStats,
    pub clients: Vec<Client>,
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
}

impl Snapshot {
    /// Rooms flagged available at fetch time
    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.is_available)
    }

    /// First `limit` reservations in backend order
    pub fn recent_reservations(&self, limit: usize) -> &[Reservation] {
        &self.reservations[..self.reservations.len().min(limit)]
    }

    pub fn client(&self, client_id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.room_id == room_id)
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.rooms.is_empty() && self.reservations.is_empty()
    }
}

/// Everything the screens render from
#[derive(Debug, Clone, Default)]
pub struct DeskState {
    pub view: View,
    pub session: Session,
    pub snapshot: Snapshot,
    /// A login or registration request is in flight
    pub loading: bool,
}

/// Which collections a dashboard refresh managed to update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub stats: bool,
    pub clients: bool,
    pub rooms: bool,
    pub reservations: bool,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.stats && self.clients && self.rooms && self.reservations
    }

    pub fn updated(&self) -> usize {
        [self.stats, self.clients, self.rooms, self.reservations]
            .iter()
            .filter(|ok| **ok)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReservationStatus;

    fn room(id: &str, available: bool) -> Room {
        Room {
            room_id: id.to_string(),
            room_number: id.to_string(),
            room_type: "Simple".to_string(),
            capacity: 2,
            price_per_night: 50.0,
            is_available: available,
            description: String::new(),
        }
    }

    fn reservation(id: &str) -> Reservation {
        Reservation {
            reservation_id: id.to_string(),
            client_id: "c1".to_string(),
            room_id: "r1".to_string(),
            client_name: "Ana".to_string(),
            room_number: "101".to_string(),
            check_in_date: "2024-01-10".to_string(),
            check_out_date: "2024-01-13".to_string(),
            guests: 1,
            nights: 3,
            total_price: 150.0,
            status: ReservationStatus::Active,
        }
    }

    #[test]
    fn test_available_rooms() {
        let snapshot = Snapshot {
            rooms: vec![room("101", true), room("201", false), room("301", true)],
            ..Default::default()
        };

        let ids: Vec<&str> = snapshot.available_rooms().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["101", "301"]);
    }

    #[test]
    fn test_recent_reservations_keeps_backend_order() {
        let snapshot = Snapshot {
            reservations: (1..=7).map(|i| reservation(&format!("res-{}", i))).collect(),
            ..Default::default()
        };

        let recent = snapshot.recent_reservations(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].reservation_id, "res-1");
        assert_eq!(recent[4].reservation_id, "res-5");

        let short = Snapshot {
            reservations: vec![reservation("res-1")],
            ..Default::default()
        };
        assert_eq!(short.recent_reservations(5).len(), 1);
    }

    #[test]
    fn test_refresh_report() {
        let report = RefreshReport {
            stats: true,
            clients: false,
            rooms: true,
            reservations: true,
        };
        assert!(!report.is_complete());
        assert_eq!(report.updated(), 3);
    }
}
