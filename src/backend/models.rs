//! Backend Wire Types
//!
//! JSON shapes exchanged with the reservation backend. Unknown fields sent by
//! the backend (audit timestamps, hotel scoping) are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// Workers
// ============================================

/// Authenticated staff member of a single hotel
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Worker {
    pub worker_id: String,
    pub name: String,
    pub email: String,
    pub hotel_name: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login: bearer token plus the worker profile
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub worker: Worker,
}

/// New-worker registration body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub hotel_name: String,
}

/// Registration acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registered {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub worker_id: Option<String>,
}

// ============================================
// Clients
// ============================================

/// Hotel guest on file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Client {
    pub client_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub identification: String,
}

/// Client registration body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub identification: String,
}

/// Client registration acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientCreated {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub client_id: Option<String>,
}

// ============================================
// Rooms
// ============================================

/// A room of the worker's hotel. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Room {
    pub room_id: String,
    pub room_number: String,
    pub room_type: String,
    #[serde(default)]
    pub capacity: u32,
    pub price_per_night: f64,
    /// Missing flag means the room is not offered for booking
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub description: String,
}

// ============================================
// Reservations
// ============================================

/// Reservation lifecycle as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Active,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Active => "Active",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Unknown => "Unknown",
        }
    }
}

/// A booking, denormalised with client name and room number for display
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub client_id: String,
    pub room_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub room_number: String,
    /// Backend timestamp, e.g. `2024-01-10T00:00:00`
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub total_price: f64,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

/// Reservation creation body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReservation {
    pub client_id: String,
    pub room_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: u32,
}

/// Backend answer to a reservation: the price is computed server-side
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReservationReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reservation_id: Option<String>,
    pub total_price: f64,
    pub nights: u32,
}

// ============================================
// Dashboard & misc
// ============================================

/// Aggregate counts computed by the backend on every fetch.
/// Missing fields read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub total_rooms: u64,
    pub available_rooms: u64,
    pub occupied_rooms: u64,
    pub active_reservations: u64,
}

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// `GET /api/health` response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Error body. FastAPI-style backends send a string `detail`, validation
/// failures send a structured one.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn into_detail(self) -> Option<String> {
        match self.detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}
