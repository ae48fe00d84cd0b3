//! View Controller
//!
//! Owns the desk state (current screen, session, backend snapshot, loading
//! flag) and turns worker actions into backend calls.
//!
//! ## Data Flow
//!
//! 1. A screen hands the controller a submitted form or an action
//! 2. The controller calls the backend with the session's bearer token
//! 3. The response replaces the session or the snapshot, never patches it
//! 4. The next render reads the new state
//!
//! ## Consistency policy
//!
//! There are no optimistic or incremental updates. Every successful mutation
//! (client, reservation, cancellation) is followed by a full
//! [`ViewController::refresh_dashboard`], whose four fetches are applied
//! independently of each other.
//!
//! ## Errors
//!
//! Failures of worker-initiated operations are shown through the
//! [`Notifier`] before being returned; the returned error only drives flow
//! control. A rejected stored token is dropped silently.

mod notify;
mod state;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use notify::Notifier;
pub use state::{DeskState, RefreshReport, Snapshot};
pub use view::View;

use futures_util::future::join4;
use thiserror::Error;

use crate::backend::{
    Backend, BackendError, Credentials, NewClient, NewReservation, ReservationReceipt,
    WorkerRegistration,
};
use crate::session::{Session, TokenStore};

pub const REGISTERED_MESSAGE: &str = "Worker registered successfully. You can now sign in.";
pub const CLIENT_CREATED_MESSAGE: &str = "Client registered successfully";
pub const RESERVATION_CANCELLED_MESSAGE: &str = "Reservation cancelled successfully";
pub const CANCEL_QUESTION: &str = "Are you sure you want to cancel this reservation?";
pub const SIGNED_OUT_MESSAGE: &str = "Your session has ended. Please sign in again.";

/// Why a controller operation did not complete
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Declined by the worker")]
    Declined,
}

/// Confirmation text shown after a reservation is booked
pub fn reservation_created_message(receipt: &ReservationReceipt) -> String {
    format!(
        "Reservation created successfully. Total: ${} for {} night(s)",
        receipt.total_price, receipt.nights
    )
}

/// Holds all shared state; screens only ever read it
pub struct ViewController<B, S, N> {
    backend: B,
    store: S,
    notifier: N,
    state: DeskState,
}

impl<B, S, N> ViewController<B, S, N>
where
    B: Backend,
    S: TokenStore,
    N: Notifier,
{
    /// Create a controller on the login screen with no session
    pub fn new(backend: B, store: S, notifier: N) -> Self {
        Self {
            backend,
            store,
            notifier,
            state: DeskState::default(),
        }
    }

    pub fn state(&self) -> &DeskState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Resume the stored session, if any.
    ///
    /// Returns whether a session was restored. A token the backend no longer
    /// accepts, or an unreachable backend, discards the stored token without
    /// telling the worker.
    pub async fn restore_session(&mut self) -> bool {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored session token");
                return false;
            }
        };

        match self.backend.profile(&token).await {
            Ok(worker) => {
                tracing::info!(worker = %worker.email, hotel = %worker.hotel_name, "Session restored");
                self.state.session = Session::authenticated(token, worker);
                self.state.view = View::Dashboard;
                self.refresh_dashboard().await;
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "Stored session rejected, signing out");
                self.forget_token();
                self.state.session = Session::anonymous();
                false
            }
        }
    }

    /// Sign a worker in and open the dashboard
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), DeskError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.state.loading = true;
        let result = self.backend.login(&credentials).await;
        self.state.loading = false;

        let response = result.map_err(|e| self.report("login", e))?;

        if let Err(e) = self.store.save(&response.token) {
            tracing::warn!(error = %e, "Signed in, but the token could not be stored");
        }
        tracing::info!(
            worker = %response.worker.email,
            hotel = %response.worker.hotel_name,
            "Worker signed in"
        );

        self.state.session = Session::authenticated(response.token, response.worker);
        self.state.view = View::Dashboard;
        self.refresh_dashboard().await;
        Ok(())
    }

    /// Register a new worker. Does not sign them in.
    pub async fn register(&mut self, registration: &WorkerRegistration) -> Result<(), DeskError> {
        self.state.loading = true;
        let result = self.backend.register(registration).await;
        self.state.loading = false;

        result.map_err(|e| self.report("register", e))?;

        tracing::info!(worker = %registration.email, hotel = %registration.hotel_name, "Worker registered");
        self.notifier.alert(REGISTERED_MESSAGE);
        self.state.view = View::Login;
        Ok(())
    }

    /// Drop the session and every fetched collection. Never fails.
    pub fn logout(&mut self) {
        self.forget_token();
        if let Some(worker) = self.state.session.worker() {
            tracing::info!(worker = %worker.email, "Worker signed out");
        }
        self.state.session = Session::anonymous();
        self.state.snapshot = Snapshot::default();
        self.state.view = View::Login;
    }

    /// Fetch stats, clients, rooms and reservations concurrently.
    ///
    /// Each result is applied on its own: a failed fetch keeps the previous
    /// copy of its collection and does not hold back the others.
    pub async fn refresh_dashboard(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();
        let Some(token) = self.state.session.token().map(str::to_owned) else {
            tracing::debug!("Dashboard refresh skipped, no session");
            return report;
        };

        let (stats, clients, rooms, reservations) = join4(
            self.backend.dashboard_stats(&token),
            self.backend.clients(&token),
            self.backend.rooms(&token),
            self.backend.reservations(&token),
        )
        .await;

        let snapshot = &mut self.state.snapshot;
        match stats {
            Ok(stats) => {
                snapshot.stats = stats;
                report.stats = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to refresh dashboard stats"),
        }
        match clients {
            Ok(clients) => {
                snapshot.clients = clients;
                report.clients = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to refresh clients"),
        }
        match rooms {
            Ok(rooms) => {
                snapshot.rooms = rooms;
                report.rooms = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to refresh rooms"),
        }
        match reservations {
            Ok(reservations) => {
                snapshot.reservations = reservations;
                report.reservations = true;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to refresh reservations"),
        }

        tracing::debug!(updated = report.updated(), "Dashboard refreshed");
        report
    }

    /// Register a hotel client, then return to the dashboard
    pub async fn create_client(&mut self, client: &NewClient) -> Result<(), DeskError> {
        let token = self.require_token()?;

        self.backend
            .create_client(&token, client)
            .await
            .map_err(|e| self.report("create client", e))?;

        tracing::info!(client = %client.email, "Client registered");
        self.notifier.alert(CLIENT_CREATED_MESSAGE);
        self.refresh_dashboard().await;
        self.state.view = View::Dashboard;
        Ok(())
    }

    /// Book a room, then return to the dashboard
    pub async fn create_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> Result<ReservationReceipt, DeskError> {
        let token = self.require_token()?;

        let receipt = self
            .backend
            .create_reservation(&token, reservation)
            .await
            .map_err(|e| self.report("create reservation", e))?;

        tracing::info!(
            room = %reservation.room_id,
            nights = receipt.nights,
            total = receipt.total_price,
            "Reservation created"
        );
        self.notifier.alert(&reservation_created_message(&receipt));
        self.refresh_dashboard().await;
        self.state.view = View::Dashboard;
        Ok(receipt)
    }

    /// Cancel a reservation after the worker confirms
    pub async fn cancel_reservation(&mut self, reservation_id: &str) -> Result<(), DeskError> {
        if !self.notifier.confirm(CANCEL_QUESTION) {
            tracing::debug!(reservation = %reservation_id, "Cancellation declined");
            return Err(DeskError::Declined);
        }
        let token = self.require_token()?;

        self.backend
            .cancel_reservation(&token, reservation_id)
            .await
            .map_err(|e| self.report("cancel reservation", e))?;

        tracing::info!(reservation = %reservation_id, "Reservation cancelled");
        self.notifier.alert(RESERVATION_CANCELLED_MESSAGE);
        self.refresh_dashboard().await;
        Ok(())
    }

    /// Switch screens. Signed-in screens fall back to login without a session.
    pub fn navigate(&mut self, view: View) -> View {
        let target = if view.requires_session() && !self.state.session.is_authenticated() {
            tracing::warn!(view = %view, "Navigation needs a session, showing login");
            View::Login
        } else {
            view
        };
        self.state.view = target;
        target
    }

    fn require_token(&mut self) -> Result<String, DeskError> {
        match self.state.session.token() {
            Some(token) => Ok(token.to_string()),
            None => {
                self.notifier.alert(SIGNED_OUT_MESSAGE);
                Err(DeskError::NotAuthenticated)
            }
        }
    }

    fn forget_token(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Could not remove stored session token");
        }
    }

    /// Show a failed call to the worker and hand the error back
    fn report(&mut self, operation: &str, error: BackendError) -> DeskError {
        tracing::warn!(operation = %operation, error = %error, "Request failed");
        self.notifier.alert(&error.user_message());
        DeskError::Backend(error)
    }
}
