//! Dashboard: occupancy stats and the latest reservations

use chrono::NaiveDate;

use crate::backend::DashboardStats;
use crate::controller::DeskState;

use super::{quit, table, Action, MenuItem, Screen};

/// Reservations shown on the dashboard, taken in backend order
pub const RECENT_RESERVATIONS: usize = 5;

/// The four stat cards, label and value, in display order
pub fn stat_cards(stats: &DashboardStats) -> [(&'static str, u64); 4] {
    [
        ("Total clients", stats.total_clients),
        ("Available rooms", stats.available_rooms),
        ("Occupied rooms", stats.occupied_rooms),
        ("Active reservations", stats.active_reservations),
    ]
}

/// Calendar date of a backend timestamp (`2024-01-10T00:00:00` → `2024-01-10`).
/// Anything unparseable is shown as received.
pub fn display_date(raw: &str) -> String {
    match NaiveDate::parse_and_remainder(raw.trim(), "%Y-%m-%d") {
        Ok((date, _)) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `$300` for whole amounts, `$149.50` otherwise
pub fn display_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

pub(super) fn render(state: &DeskState) -> Screen {
    let snapshot = &state.snapshot;
    let mut body = String::new();

    if let Some(worker) = state.session.worker() {
        body.push_str(&format!("{} | {}\n\n", worker.hotel_name, worker.name));
    }

    let cards = stat_cards(&snapshot.stats)
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("   ");
    body.push_str(&cards);
    body.push_str("\n\nRecent reservations\n");

    let mut menu = vec![
        MenuItem::new("c", "Clients", Action::ShowClients),
        MenuItem::new("r", "Reservations", Action::ShowReservations),
        MenuItem::new("u", "Refresh", Action::Refresh),
    ];

    let recent = snapshot.recent_reservations(RECENT_RESERVATIONS);
    if recent.is_empty() {
        body.push_str("No reservations yet\n");
    } else {
        let mut rows = Vec::with_capacity(recent.len());
        for (i, reservation) in recent.iter().enumerate() {
            let key = format!("x{}", i + 1);
            let cancel = if reservation.is_active() {
                menu.push(MenuItem::new(
                    key.clone(),
                    format!(
                        "Cancel reservation of {} (room {})",
                        reservation.client_name, reservation.room_number
                    ),
                    Action::CancelReservation(reservation.reservation_id.clone()),
                ));
                key
            } else {
                String::new()
            };
            rows.push(vec![
                reservation.client_name.clone(),
                reservation.room_number.clone(),
                display_date(&reservation.check_in_date),
                display_date(&reservation.check_out_date),
                display_price(reservation.total_price),
                reservation.status.label().to_string(),
                cancel,
            ]);
        }
        body.push_str(&table(
            &["Client", "Room", "Check-in", "Check-out", "Total", "Status", ""],
            &rows,
        ));
    }

    menu.push(MenuItem::new("l", "Log out", Action::Logout));
    menu.push(quit());

    Screen {
        title: "Dashboard".to_string(),
        body,
        menu,
    }
}
