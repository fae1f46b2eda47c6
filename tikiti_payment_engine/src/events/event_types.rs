use crate::db_types::Order;

/// Emitted exactly when an order transitions into `Paid`. Consumers (the ticket dispatcher) get a snapshot of the
/// order as committed; nothing they do can affect the already-persisted status.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDispatchEvent {
    pub order: Order,
}

impl TicketDispatchEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
