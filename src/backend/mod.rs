//! Reservation Backend
//!
//! Everything the desk knows about the outside world: pricing, availability,
//! persistence and authentication all live behind these endpoints.
//!
//! ## Architecture
//!
//! - **Backend**: async trait, one method per endpoint
//! - **HttpBackend**: reqwest implementation used by the binary
//! - **models**: JSON request/response bodies
//!
//! Every method except `login`, `register` and `health` takes the bearer
//! token of the current session.

mod client;
mod error;
pub mod models;

pub use client::{HttpBackend, HttpBackendConfig};
pub use error::{BackendError, BackendResult, CONNECTION_ERROR_MESSAGE, UNKNOWN_ERROR_DETAIL};
pub use models::{
    Ack, Client, ClientCreated, Credentials, DashboardStats, HealthStatus, LoginResponse,
    NewClient, NewReservation, Registered, Reservation, ReservationReceipt, ReservationStatus,
    Room, Worker, WorkerRegistration,
};

use async_trait::async_trait;

/// Contract with the reservation backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/workers/login`
    async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse>;

    /// `POST /api/workers/register`
    async fn register(&self, registration: &WorkerRegistration) -> BackendResult<Registered>;

    /// `GET /api/workers/profile`
    async fn profile(&self, token: &str) -> BackendResult<Worker>;

    /// `GET /api/dashboard/stats`
    async fn dashboard_stats(&self, token: &str) -> BackendResult<DashboardStats>;

    /// `GET /api/clients`
    async fn clients(&self, token: &str) -> BackendResult<Vec<Client>>;

    /// `POST /api/clients`
    async fn create_client(&self, token: &str, client: &NewClient) -> BackendResult<ClientCreated>;

    /// `GET /api/rooms`
    async fn rooms(&self, token: &str) -> BackendResult<Vec<Room>>;

    /// `GET /api/reservations`
    async fn reservations(&self, token: &str) -> BackendResult<Vec<Reservation>>;

    /// `POST /api/reservations`
    async fn create_reservation(
        &self,
        token: &str,
        reservation: &NewReservation,
    ) -> BackendResult<ReservationReceipt>;

    /// `DELETE /api/reservations/{id}`
    async fn cancel_reservation(&self, token: &str, reservation_id: &str) -> BackendResult<Ack>;

    /// `GET /api/health`
    async fn health(&self) -> BackendResult<HealthStatus>;
}
