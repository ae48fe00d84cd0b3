//! Reservation management: booking form and available rooms panel

use crate::backend::{NewReservation, Room};
use crate::controller::{DeskState, Snapshot};

use super::dashboard::display_price;
use super::{
    back_to_dashboard, quit, Action, Choice, FieldKind, Form, FormError, FormField, FormValues,
    MenuItem, Screen,
};

const CLIENT: FormField = FormField::new("client_id", "Client", FieldKind::ClientSelect);
const ROOM: FormField = FormField::new("room_id", "Room", FieldKind::RoomSelect);
const CHECK_IN: FormField = FormField::new("check_in_date", "Check-in date", FieldKind::Date);
const CHECK_OUT: FormField = FormField::new("check_out_date", "Check-out date", FieldKind::Date);
const GUESTS: FormField = FormField::new("guests", "Guests", FieldKind::Number);

/// Rooms that may be booked: only those flagged available
pub fn selectable_rooms(snapshot: &Snapshot) -> Vec<&Room> {
    snapshot.available_rooms().collect()
}

pub fn client_options(snapshot: &Snapshot) -> Vec<Choice> {
    snapshot
        .clients
        .iter()
        .map(|c| Choice {
            value: c.client_id.clone(),
            label: format!("{} - {}", c.name, c.email),
        })
        .collect()
}

pub fn room_options(snapshot: &Snapshot) -> Vec<Choice> {
    selectable_rooms(snapshot)
        .into_iter()
        .map(|r| Choice {
            value: r.room_id.clone(),
            label: format!(
                "{} - {} - {}/night",
                r.room_number,
                r.room_type,
                display_price(r.price_per_night)
            ),
        })
        .collect()
}

pub struct ReservationForm;

impl Form for ReservationForm {
    type Output = NewReservation;

    const FIELDS: &'static [FormField] = &[CLIENT, ROOM, CHECK_IN, CHECK_OUT, GUESTS];

    fn parse(values: &FormValues, snapshot: &Snapshot) -> Result<NewReservation, FormError> {
        let client_id = values.required(&CLIENT)?;
        if snapshot.client(&client_id).is_none() {
            return Err(FormError::UnknownOption(CLIENT.label));
        }
        let room_id = values.required(&ROOM)?;
        if !selectable_rooms(snapshot).iter().any(|r| r.room_id == room_id) {
            return Err(FormError::UnknownOption(ROOM.label));
        }

        Ok(NewReservation {
            client_id,
            room_id,
            check_in_date: values.date(&CHECK_IN)?,
            check_out_date: values.date(&CHECK_OUT)?,
            guests: values.count(&GUESTS)?,
        })
    }
}

pub(super) fn render(state: &DeskState) -> Screen {
    let rooms = selectable_rooms(&state.snapshot);

    let mut body = format!("Available rooms ({})\n", rooms.len());
    if rooms.is_empty() {
        body.push_str("No rooms available\n");
    }
    for room in rooms {
        body.push_str(&format!(
            "  Room {} - {} - capacity {} - {}/night\n",
            room.room_number,
            room.room_type,
            room.capacity,
            display_price(room.price_per_night)
        ));
        if !room.description.is_empty() {
            body.push_str(&format!("    {}\n", room.description));
        }
    }

    Screen {
        title: "Reservation management".to_string(),
        body,
        menu: vec![
            MenuItem::new("n", "Create a reservation", Action::SubmitReservation),
            back_to_dashboard(),
            quit(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Client;
    use chrono::NaiveDate;

    fn room(id: &str, number: &str, available: bool) -> Room {
        Room {
            room_id: id.to_string(),
            room_number: number.to_string(),
            room_type: "Doble".to_string(),
            capacity: 2,
            price_per_night: 100.0,
            is_available: available,
            description: "Sea view".to_string(),
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            clients: vec![Client {
                client_id: "c1".to_string(),
                name: "Bruno".to_string(),
                email: "bruno@mail.test".to_string(),
                phone: String::new(),
                identification: String::new(),
            }],
            rooms: vec![
                room("r1", "101", true),
                room("r2", "201", false),
                room("r3", "301", true),
            ],
            ..Default::default()
        }
    }

    fn booking(room_id: &str) -> FormValues {
        let mut values = FormValues::new();
        values
            .set("client_id", "c1")
            .set("room_id", room_id)
            .set("check_in_date", "2024-01-10")
            .set("check_out_date", "2024-01-13")
            .set("guests", "2");
        values
    }

    #[test]
    fn test_room_selector_lists_only_available() {
        let options = room_options(&snapshot());
        let values: Vec<&str> = options.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["r1", "r3"]);
        assert_eq!(options[0].label, "101 - Doble - $100/night");
    }

    #[test]
    fn test_client_options() {
        let options = client_options(&snapshot());
        assert_eq!(options[0].label, "Bruno - bruno@mail.test");
    }

    #[test]
    fn test_parse_booking() {
        let reservation = ReservationForm::parse(&booking("r3"), &snapshot()).unwrap();
        assert_eq!(reservation.room_id, "r3");
        assert_eq!(
            reservation.check_in_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(
            reservation.check_out_date,
            NaiveDate::from_ymd_opt(2024, 1, 13).unwrap()
        );
        assert_eq!(reservation.guests, 2);
    }

    #[test]
    fn test_unavailable_room_rejected() {
        assert_eq!(
            ReservationForm::parse(&booking("r2"), &snapshot()).unwrap_err(),
            FormError::UnknownOption("Room")
        );
    }

    #[test]
    fn test_guests_minimum() {
        let mut values = booking("r1");
        values.set("guests", "0");
        assert_eq!(
            ReservationForm::parse(&values, &snapshot()).unwrap_err(),
            FormError::InvalidNumber("Guests")
        );
    }

    #[test]
    fn test_panel_shows_room_details() {
        let state = DeskState {
            snapshot: snapshot(),
            ..Default::default()
        };
        let screen = render(&state);
        assert!(screen.body.contains("Available rooms (2)"));
        assert!(screen.body.contains("Room 301 - Doble - capacity 2 - $100/night"));
        assert!(screen.body.contains("Sea view"));
        assert!(!screen.body.contains("Room 201"));
    }
}
