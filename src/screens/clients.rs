//! Client management: registration form and client list

use crate::backend::NewClient;
use crate::controller::{DeskState, Snapshot};

use super::{
    back_to_dashboard, quit, table, Action, FieldKind, Form, FormError, FormField, FormValues,
    MenuItem, Screen,
};

const NAME: FormField = FormField::new("name", "Full name", FieldKind::Text);
const EMAIL: FormField = FormField::new("email", "Email", FieldKind::Email);
const PHONE: FormField = FormField::new("phone", "Phone", FieldKind::Text);
const IDENTIFICATION: FormField =
    FormField::new("identification", "Identification", FieldKind::Text);

pub struct ClientForm;

impl Form for ClientForm {
    type Output = NewClient;

    const FIELDS: &'static [FormField] = &[NAME, EMAIL, PHONE, IDENTIFICATION];

    fn parse(values: &FormValues, _snapshot: &Snapshot) -> Result<NewClient, FormError> {
        Ok(NewClient {
            name: values.required(&NAME)?,
            email: values.email(&EMAIL)?,
            phone: values.required(&PHONE)?,
            identification: values.required(&IDENTIFICATION)?,
        })
    }
}

pub(super) fn render(state: &DeskState) -> Screen {
    let clients = &state.snapshot.clients;

    let body = if clients.is_empty() {
        "No clients registered".to_string()
    } else {
        let rows: Vec<Vec<String>> = clients
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.email.clone(),
                    c.phone.clone(),
                    c.identification.clone(),
                ]
            })
            .collect();
        format!(
            "Registered clients ({})\n{}",
            clients.len(),
            table(&["Name", "Email", "Phone", "Identification"], &rows)
        )
    };

    Screen {
        title: "Client management".to_string(),
        body,
        menu: vec![
            MenuItem::new("n", "Register a client", Action::SubmitClient),
            back_to_dashboard(),
            quit(),
        ],
    }
}
