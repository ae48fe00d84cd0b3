//! Worker registration screen

use crate::backend::WorkerRegistration;
use crate::controller::{DeskState, Snapshot};

use super::{quit, Action, FieldKind, Form, FormError, FormField, FormValues, MenuItem, Screen};

pub const REGISTERING: &str = "Registering...";

const NAME: FormField = FormField::new("name", "Full name", FieldKind::Text);
const EMAIL: FormField = FormField::new("email", "Email", FieldKind::Email);
const PHONE: FormField = FormField::new("phone", "Phone", FieldKind::Text);
const HOTEL: FormField = FormField::new("hotel_name", "Hotel name", FieldKind::Text);
const PASSWORD: FormField = FormField::new("password", "Password", FieldKind::Secret);

pub struct RegisterForm;

impl Form for RegisterForm {
    type Output = WorkerRegistration;

    const FIELDS: &'static [FormField] = &[NAME, EMAIL, PHONE, HOTEL, PASSWORD];

    fn parse(values: &FormValues, _snapshot: &Snapshot) -> Result<WorkerRegistration, FormError> {
        Ok(WorkerRegistration {
            email: values.email(&EMAIL)?,
            password: values.required(&PASSWORD)?,
            name: values.required(&NAME)?,
            phone: values.required(&PHONE)?,
            hotel_name: values.required(&HOTEL)?,
        })
    }
}

pub(super) fn render(_state: &DeskState) -> Screen {
    Screen {
        title: "Hotel Desk - New worker".to_string(),
        body: "Create a worker account. You will sign in with it afterwards.".to_string(),
        menu: vec![
            MenuItem::new("s", "Register", Action::SubmitRegistration),
            MenuItem::new("b", "Back to sign in", Action::ShowLogin),
            quit(),
        ],
    }
}
