//! In-memory backend and notifier for the controller and shell tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::*;

use super::Notifier;

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "secret";

pub fn worker() -> Worker {
    Worker {
        worker_id: "w1".to_string(),
        name: "Ana".to_string(),
        email: "ana@sol.test".to_string(),
        hotel_name: "Hotel Sol".to_string(),
    }
}

pub fn client(id: &str, name: &str) -> Client {
    Client {
        client_id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@mail.test", name.to_lowercase()),
        phone: "555-0100".to_string(),
        identification: format!("ID-{}", id),
    }
}

pub fn room(id: &str, number: &str, price: f64, available: bool) -> Room {
    Room {
        room_id: id.to_string(),
        room_number: number.to_string(),
        room_type: "Simple".to_string(),
        capacity: 2,
        price_per_night: price,
        is_available: available,
        description: format!("Room {}", number),
    }
}

pub fn reservation(id: &str, status: ReservationStatus) -> Reservation {
    Reservation {
        reservation_id: id.to_string(),
        client_id: "c1".to_string(),
        room_id: "r1".to_string(),
        client_name: "Bruno".to_string(),
        room_number: "101".to_string(),
        check_in_date: "2024-01-10T00:00:00".to_string(),
        check_out_date: "2024-01-13T00:00:00".to_string(),
        guests: 2,
        nights: 3,
        total_price: 150.0,
        status,
    }
}

/// Backend state the fake serves and mutates
pub struct FakeState {
    pub calls: Vec<String>,
    /// Endpoints answering 500 "boom"
    pub failing: HashSet<&'static str>,
    /// Every call fails with a transport error
    pub offline: bool,
    pub stats: DashboardStats,
    pub clients: Vec<Client>,
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub receipt: ReservationReceipt,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            failing: HashSet::new(),
            offline: false,
            stats: DashboardStats {
                total_clients: 5,
                total_rooms: 10,
                available_rooms: 3,
                occupied_rooms: 7,
                active_reservations: 4,
            },
            clients: vec![client("c1", "Bruno")],
            rooms: vec![
                room("r1", "101", 50.0, true),
                room("r2", "201", 80.0, false),
                room("r3", "301", 150.0, true),
            ],
            reservations: vec![reservation("res-1", ReservationStatus::Active)],
            receipt: ReservationReceipt {
                message: "Reserva creada exitosamente".to_string(),
                reservation_id: Some("res-new".to_string()),
                total_price: 300.0,
                nights: 3,
            },
        }
    }
}

/// Cloneable handle; clones share the same state
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap()
    }

    pub fn fail(&self, endpoint: &'static str) {
        self.state().failing.insert(endpoint);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn called(&self, endpoint: &str) -> bool {
        self.state().calls.iter().any(|c| c == endpoint)
    }

    fn enter(&self, endpoint: &'static str, token: Option<&str>) -> BackendResult<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(endpoint.to_string());

        if state.offline {
            return Err(BackendError::Connection("connection refused".to_string()));
        }
        if let Some(token) = token {
            if token != TOKEN {
                return Err(BackendError::Api {
                    status: 401,
                    detail: "Token inválido".to_string(),
                });
            }
        }
        if state.failing.contains(endpoint) {
            return Err(BackendError::Api {
                status: 500,
                detail: "boom".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse> {
        self.enter("login", None)?;
        let worker = worker();
        if credentials.email == worker.email && credentials.password == PASSWORD {
            Ok(LoginResponse {
                token: TOKEN.to_string(),
                worker,
            })
        } else {
            Err(BackendError::Api {
                status: 401,
                detail: "Credenciales inválidas".to_string(),
            })
        }
    }

    async fn register(&self, registration: &WorkerRegistration) -> BackendResult<Registered> {
        self.enter("register", None)?;
        if registration.email == worker().email {
            return Err(BackendError::Api {
                status: 400,
                detail: "El trabajador ya existe".to_string(),
            });
        }
        Ok(Registered {
            message: "Trabajador registrado exitosamente".to_string(),
            worker_id: Some("w2".to_string()),
        })
    }

    async fn profile(&self, token: &str) -> BackendResult<Worker> {
        self.enter("profile", Some(token))?;
        Ok(worker())
    }

    async fn dashboard_stats(&self, token: &str) -> BackendResult<DashboardStats> {
        Ok(self.enter("stats", Some(token))?.stats)
    }

    async fn clients(&self, token: &str) -> BackendResult<Vec<Client>> {
        Ok(self.enter("clients", Some(token))?.clients.clone())
    }

    async fn create_client(&self, token: &str, new: &NewClient) -> BackendResult<ClientCreated> {
        let mut state = self.enter("create_client", Some(token))?;
        if state.clients.iter().any(|c| c.email == new.email) {
            return Err(BackendError::Api {
                status: 400,
                detail: "El cliente ya existe".to_string(),
            });
        }
        let client_id = format!("c{}", state.clients.len() + 1);
        state.clients.push(Client {
            client_id: client_id.clone(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            identification: new.identification.clone(),
        });
        state.stats.total_clients += 1;
        Ok(ClientCreated {
            message: "Cliente registrado exitosamente".to_string(),
            client_id: Some(client_id),
        })
    }

    async fn rooms(&self, token: &str) -> BackendResult<Vec<Room>> {
        Ok(self.enter("rooms", Some(token))?.rooms.clone())
    }

    async fn reservations(&self, token: &str) -> BackendResult<Vec<Reservation>> {
        Ok(self.enter("reservations", Some(token))?.reservations.clone())
    }

    async fn create_reservation(
        &self,
        token: &str,
        new: &NewReservation,
    ) -> BackendResult<ReservationReceipt> {
        let mut state = self.enter("create_reservation", Some(token))?;
        let available = state
            .rooms
            .iter()
            .any(|r| r.room_id == new.room_id && r.is_available);
        if !available {
            return Err(BackendError::Api {
                status: 404,
                detail: "Habitación no disponible".to_string(),
            });
        }

        let receipt = state.receipt.clone();
        let mut created = reservation("res-new", ReservationStatus::Active);
        created.client_id = new.client_id.clone();
        created.room_id = new.room_id.clone();
        created.total_price = receipt.total_price;
        created.nights = receipt.nights;
        state.reservations.insert(0, created);
        for room in state.rooms.iter_mut().filter(|r| r.room_id == new.room_id) {
            room.is_available = false;
        }
        Ok(receipt)
    }

    async fn cancel_reservation(&self, token: &str, reservation_id: &str) -> BackendResult<Ack> {
        let mut state = self.enter("cancel_reservation", Some(token))?;
        match state
            .reservations
            .iter_mut()
            .find(|r| r.reservation_id == reservation_id)
        {
            Some(reservation) => {
                reservation.status = ReservationStatus::Cancelled;
                Ok(Ack {
                    message: "Reserva cancelada exitosamente".to_string(),
                })
            }
            None => Err(BackendError::Api {
                status: 404,
                detail: "Reserva no encontrada".to_string(),
            }),
        }
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        self.enter("health", None)?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
        })
    }
}

/// Records alerts and answers confirmations with a fixed reply
#[derive(Clone)]
pub struct RecordingNotifier {
    pub alerts: Arc<Mutex<Vec<String>>>,
    pub questions: Arc<Mutex<Vec<String>>>,
    pub accept: bool,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self {
            alerts: Arc::default(),
            questions: Arc::default(),
            accept: true,
        }
    }

    pub fn declining() -> Self {
        Self {
            accept: false,
            ..Self::accepting()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.accept
    }
}
