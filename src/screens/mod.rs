//! Screens
//!
//! Pure renderers: each screen turns the current [`DeskState`] into text plus
//! a menu of [`Action`]s. Screens never call the backend; submitted forms are
//! parsed here and handed to the controller by the shell.
//!
//! ## Forms
//!
//! Form fields are described statically ([`Form::FIELDS`]) and only read at
//! submit time, as a [`FormValues`] map. [`Form::parse`] applies the client
//! side checks (required fields, dates, guest count, selector membership)
//! before any request is made.

mod clients;
mod dashboard;
mod login;
mod register;
mod reservations;

pub use clients::ClientForm;
pub use dashboard::{display_date, display_price, stat_cards, RECENT_RESERVATIONS};
pub use login::{LoginForm, SIGNING_IN};
pub use register::{RegisterForm, REGISTERING};
pub use reservations::{client_options, room_options, selectable_rooms, ReservationForm};

use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

use crate::controller::{DeskState, Snapshot, View};

/// What a menu entry asks the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SignIn,
    ShowRegister,
    SubmitRegistration,
    ShowLogin,
    ShowDashboard,
    ShowClients,
    ShowReservations,
    Refresh,
    SubmitClient,
    SubmitReservation,
    CancelReservation(String),
    Logout,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub action: Action,
}

impl MenuItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>, action: Action) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            action,
        }
    }
}

/// A rendered screen
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub title: String,
    pub body: String,
    pub menu: Vec<MenuItem>,
}

impl Screen {
    /// Look up the action bound to a menu key (case-insensitive)
    pub fn action_for(&self, key: &str) -> Option<&Action> {
        let key = key.trim();
        self.menu
            .iter()
            .find(|item| item.key.eq_ignore_ascii_case(key))
            .map(|item| &item.action)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.chars().count()));
        out.push('\n');
        if !self.body.is_empty() {
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push('\n');
        for item in &self.menu {
            out.push_str(&format!("  [{}] {}\n", item.key, item.label));
        }
        out
    }
}

/// Render whichever screen the state selects
pub fn render(state: &DeskState) -> Screen {
    match state.view {
        View::Login => login::render(state),
        View::Register => register::render(state),
        View::Dashboard => dashboard::render(state),
        View::Clients => clients::render(state),
        View::Reservations => reservations::render(state),
    }
}

fn quit() -> MenuItem {
    MenuItem::new("q", "Quit", Action::Quit)
}

fn back_to_dashboard() -> MenuItem {
    MenuItem::new("b", "Back to dashboard", Action::ShowDashboard)
}

/// Left-aligned text table. Column widths follow the widest cell.
pub(crate) fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = table_line(headers, &widths);
    out.push('\n');
    let total = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&table_line(&cells, &widths));
        out.push('\n');
    }
    out
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// How a field is entered and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Email,
    /// `YYYY-MM-DD`
    Date,
    /// Whole number, at least 1
    Number,
    /// One of the snapshot's clients
    ClientSelect,
    /// One of the snapshot's available rooms
    RoomSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// One entry of a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Options offered for a selector field, empty for free-text fields
pub fn choices(kind: FieldKind, snapshot: &Snapshot) -> Vec<Choice> {
    match kind {
        FieldKind::ClientSelect => client_options(snapshot),
        FieldKind::RoomSelect => room_options(snapshot),
        _ => Vec::new(),
    }
}

/// Why a submitted form was not sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a date (YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("{0} must be a whole number of at least 1")]
    InvalidNumber(&'static str),

    #[error("{0} must be an email address")]
    InvalidEmail(&'static str),

    #[error("{0}: pick one of the listed options")]
    UnknownOption(&'static str),
}

/// Raw field values collected at submit time
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    values: HashMap<&'static str, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name, value.into());
        self
    }

    /// Trimmed value, empty when unset
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(|v| v.trim()).unwrap_or("")
    }

    pub(crate) fn required(&self, field: &FormField) -> Result<String, FormError> {
        let value = if field.kind == FieldKind::Secret {
            // Passwords are sent as typed
            self.values.get(field.name).map(String::as_str).unwrap_or("")
        } else {
            self.get(field.name)
        };
        if value.trim().is_empty() {
            return Err(FormError::Missing(field.label));
        }
        Ok(value.to_string())
    }

    pub(crate) fn email(&self, field: &FormField) -> Result<String, FormError> {
        let value = self.required(field)?;
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(value),
            _ => Err(FormError::InvalidEmail(field.label)),
        }
    }

    pub(crate) fn date(&self, field: &FormField) -> Result<NaiveDate, FormError> {
        let value = self.required(field)?;
        NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| FormError::InvalidDate(field.label))
    }

    pub(crate) fn count(&self, field: &FormField) -> Result<u32, FormError> {
        let value = self.required(field)?;
        match value.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(FormError::InvalidNumber(field.label)),
        }
    }
}

/// A form a screen offers, parsed into a backend payload
pub trait Form {
    type Output;

    /// Fields in prompt order
    const FIELDS: &'static [FormField];

    fn parse(values: &FormValues, snapshot: &Snapshot) -> Result<Self::Output, FormError>;
}
