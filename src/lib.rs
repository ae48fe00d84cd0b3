//! # Hotel Desk
//!
//! Front desk client for a hotel reservation service. Workers sign in, watch
//! occupancy, register clients and book or cancel room reservations. Pricing,
//! availability and persistence all live in the reservation backend; this
//! crate is the view layer and form collector in front of it.
//!
//! ## Modules
//!
//! - [`backend`]: Backend contract and its reqwest implementation
//! - [`session`]: Session value and durable token storage
//! - [`controller`]: View state machine and the operations that drive it
//! - [`screens`]: Text renderers and form parsing for each screen
//! - [`shell`]: Interactive terminal loop
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hotel_desk::backend::{HttpBackend, HttpBackendConfig};
//! use hotel_desk::session::FileTokenStore;
//! use hotel_desk::shell::{Shell, Terminal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(HttpBackendConfig::default())?;
//!     let store = FileTokenStore::new("~/.local/share/hotel-desk/token");
//!
//!     let stdin = std::io::stdin();
//!     let terminal = Terminal::new(stdin.lock(), std::io::stdout());
//!
//!     Shell::new(backend, store, terminal).run().await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod screens;
pub mod session;
pub mod shell;

// Re-export top-level types for convenience
pub use backend::{Backend, BackendError, BackendResult, HttpBackend, HttpBackendConfig};

pub use controller::{DeskError, DeskState, Notifier, RefreshReport, Snapshot, View, ViewController};

pub use screens::{Action, Form, FormError, Screen};

pub use session::{FileTokenStore, MemoryTokenStore, Session, StoreError, TokenStore};

pub use shell::{Shell, Terminal};

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, SessionConfig};
