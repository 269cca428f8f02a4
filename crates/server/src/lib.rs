//! Pinmatch Server - HTTP REST API for address accuracy scoring
//!
//! This crate exposes the Pinmatch pipeline over HTTP. A client posts an
//! address with its PIN code; the server fetches the post offices registered
//! for that PIN code and reports how closely the address matches the best one.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /api/v1/address/calculate_accuracy` - Score an address
//!
//! Request body:
//!
//! ```json
//! {
//!   "pincode": "400069",
//!   "city": "Mumbai",
//!   "addressLineOne": "12 Hill Road",
//!   "addressLineTwo": "Andheri East"
//! }
//! ```
//!
//! Response body: `{"accuracy": "100", "address": {...}, "names": [...]}`.
//! Errors use `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
