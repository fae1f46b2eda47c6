//! The traits that define the engine's external collaborators.
//!
//! The reconciliation flow never talks to a concrete database or HTTP client; it is generic over [`OrderStore`]
//! (the document store holding orders) and [`PushGateway`] (the provider client that triggers the push prompt).
//! The SQLite backend in this crate implements [`OrderStore`]; the payment server's integrations module implements
//! [`PushGateway`] on top of `stk_tools`.
mod order_store;
mod push_gateway;

pub use order_store::{OrderStore, OrderStoreError};
pub use push_gateway::{PushGateway, PushGatewayError};
