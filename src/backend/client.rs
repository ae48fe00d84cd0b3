//! Reservation Backend HTTP Client
//!
//! reqwest implementation of [`Backend`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{BackendError, BackendResult, UNKNOWN_ERROR_DETAIL};
use super::models::*;
use super::Backend;

/// Configuration for the HTTP backend client
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the backend (e.g., "http://localhost:8001")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl From<&crate::config::BackendConfig> for HttpBackendConfig {
    fn from(config: &crate::config::BackendConfig) -> Self {
        Self {
            base_url: config.url.clone(),
            request_timeout_ms: config.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Reservation backend reached over HTTP
pub struct HttpBackend {
    client: reqwest::Client,
    config: HttpBackendConfig,
}

impl HttpBackend {
    /// Create a new client with the given configuration
    pub fn new(config: HttpBackendConfig) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| BackendError::Connection(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> BackendResult<T> {
        self.execute(self.request(Method::GET, path, token)).await
    }

    async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> BackendResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path, token).json(body))
            .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> BackendResult<T> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Turn non-success responses into [`BackendError::Api`], keeping the
    /// backend's `detail` text when there is one.
    async fn check_status(response: Response) -> BackendResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_detail)
            .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string());

        tracing::debug!(status = status.as_u16(), detail = %detail, "Backend rejected request");

        Err(BackendError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse> {
        self.post("/api/workers/login", None, credentials).await
    }

    async fn register(&self, registration: &WorkerRegistration) -> BackendResult<Registered> {
        self.post("/api/workers/register", None, registration).await
    }

    async fn profile(&self, token: &str) -> BackendResult<Worker> {
        self.get("/api/workers/profile", Some(token)).await
    }

    async fn dashboard_stats(&self, token: &str) -> BackendResult<DashboardStats> {
        self.get("/api/dashboard/stats", Some(token)).await
    }

    async fn clients(&self, token: &str) -> BackendResult<Vec<Client>> {
        self.get("/api/clients", Some(token)).await
    }

    async fn create_client(&self, token: &str, client: &NewClient) -> BackendResult<ClientCreated> {
        self.post("/api/clients", Some(token), client).await
    }

    async fn rooms(&self, token: &str) -> BackendResult<Vec<Room>> {
        self.get("/api/rooms", Some(token)).await
    }

    async fn reservations(&self, token: &str) -> BackendResult<Vec<Reservation>> {
        self.get("/api/reservations", Some(token)).await
    }

    async fn create_reservation(
        &self,
        token: &str,
        reservation: &NewReservation,
    ) -> BackendResult<ReservationReceipt> {
        self.post("/api/reservations", Some(token), reservation).await
    }

    async fn cancel_reservation(&self, token: &str, reservation_id: &str) -> BackendResult<Ack> {
        let path = format!("/api/reservations/{}", urlencoding::encode(reservation_id));
        self.execute(self.request(Method::DELETE, &path, Some(token)))
            .await
    }

    async fn health(&self) -> BackendResult<HealthStatus> {
        self.get("/api/health", None).await
    }
}
