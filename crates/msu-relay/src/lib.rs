//! MSU relay: bridges a merchant checkout to the MSU 3-D Secure and SALE API.
//!
//! `GET /auth3d` renders a page that auto-posts the shopper's browser into
//! the gateway's 3DS challenge. `POST /sale` then forwards the SALE
//! server-to-server and relays the gateway's JSON back to the caller.
//!
//! # Modules
//!
//! - [`config`]: Environment configuration ([`RelayConfig`])
//! - [`routes`]: HTTP handlers and [`routes::configure`] for mounting them
//! - [`msu`]: Outbound SALE call ([`forward_sale`](msu::forward_sale)) behind [`MsuTransport`](msu::MsuTransport)
//! - [`pages`]: Redirect and error page rendering with HTML escaping
//! - [`server`]: Binds and runs the server ([`server::run`])

pub mod config;
pub mod cors;
pub mod error;
pub mod msu;
pub mod pages;
pub mod redact;
pub mod routes;
pub mod server;
pub mod state;

pub use config::RelayConfig;
pub use error::{RelayError, SaleError};
pub use state::AppState;
