mod callback;
mod errors;
mod order_flow_api;

pub use callback::{classify, CallbackDisposition, CallbackNotification, CallbackOutcome, CorrelationStrategy};
pub use errors::OrderFlowError;
pub use order_flow_api::OrderFlowApi;
