//! Client library for the STK push-payment provider.
//!
//! This crate wraps the provider's two outbound endpoints (bearer-token authentication and the STK push itself) and
//! the asynchronous callback payload it posts back to merchants. It knows nothing about orders or ticketing; the
//! payment server adapts it onto the engine's traits.

mod api;
mod auth;
mod config;
pub mod data_objects;
mod error;
pub mod helpers;

pub use api::StkApi;
pub use auth::TokenCache;
pub use config::StkConfig;
pub use error::StkApiError;
