//! ICS Mobile - Client Library
//!
//! Client library for the ICS ticket/order service: a single HTTP choke
//! point with bearer-token attachment and response normalization, an
//! injected session context with credential persistence and expiry handling,
//! and per-domain state containers over the resource APIs.
//!
//! # Module Structure
//!
//! - **`client`** - HTTP client wrapper
//!   - Request descriptors, envelope normalization, failure classification
//! - **`session`** - Session context and expiry protocol
//!   - Credential storage, expiry events, delayed login redirect
//! - **`api`** - Resource action modules (`/users/*`, `/tickets/*`, `/orders/*`)
//! - **`stores`** - State containers with loading/error bookkeeping
//! - **`models`** - Wire types
//! - **`routes`** - Route table and auth guard
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use icsmobile::client::ApiClient;
//! use icsmobile::config::Config;
//! use icsmobile::session::{FileCredentialStore, SessionContext};
//! use icsmobile::stores::TicketStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(FileCredentialStore::new()?);
//! let (session, _events) = SessionContext::new(store);
//! let client = ApiClient::new(Config::new(), session)?;
//!
//! let mut tickets = TicketStore::new();
//! tickets.load_list(&client, &Default::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod stores;

pub use client::{ApiClient, RequestDescriptor};
pub use config::Config;
pub use error::ApiError;
pub use session::{SessionContext, SessionEvent, SessionExpiryHandler};
