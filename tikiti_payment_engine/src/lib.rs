//! # Tikiti payment engine
//!
//! The reconciliation core for mobile-money ticket orders. The engine accepts a validated booking, persists it,
//! asks a push gateway to prompt the payer's device, and later settles the order from the provider's asynchronous
//! callback. The two halves meet only in the database row; the provider decides when (and whether) the callback
//! arrives.
//!
//! The main modules are:
//! * [`flow`]: the [`OrderFlowApi`], the order state machine and the callback resolver.
//! * [`traits`]: the storage and push-gateway seams the flow is generic over.
//! * [`sqlite`]: the sqlite implementation of the order store.
//! * [`events`]: pub-sub hooks that fire when an order is paid, used to dispatch tickets out of band.
//!
//! ## Order lifecycle
//!
//! Orders are created `Pending`, move to `InitiatedStkPush` when the provider accepts the push request, and settle
//! into exactly one of `Paid`, `Failed`, `Cancelled` or `TimedOut`. Terminal states are final; the only callback
//! accepted against a settled order is the provider's own duplicate notification, which is acknowledged and
//! discarded.

pub mod db_types;
pub mod events;
pub mod flow;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "test_utils")]
pub mod test_utils;

pub use flow::{CallbackOutcome, OrderFlowApi, OrderFlowError};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
