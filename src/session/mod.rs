//! Worker Session
//!
//! The session is a value: every transition builds a new one and the view
//! controller swaps it in whole. Only the bearer token is persisted, through
//! a [`TokenStore`].

mod store;

pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};

use crate::backend::Worker;

/// Bearer credential plus the worker profile it was validated against
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    worker: Option<Worker>,
}

impl Session {
    /// No credential, no profile
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Token accepted by the backend together with its profile
    pub fn authenticated(token: impl Into<String>, worker: Worker) -> Self {
        Self {
            token: Some(token.into()),
            worker: Some(worker),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn worker(&self) -> Option<&Worker> {
        self.worker.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.worker.is_some()
    }
}
