//! Ticket dispatch for paid orders.
//!
//! When an order settles as `Paid`, the engine publishes a [`TicketDispatchEvent`]. The handler installed here
//! forwards the order to the ticketing backend, which generates the tickets and emails them to the buyer. Dispatch
//! is strictly best effort: the payment is already committed, so a delivery failure is logged and retried by the
//! ticketing backend's own reconciliation, never by failing the order.

use log::*;
use serde_json::json;
use tikiti_payment_engine::events::{EventHooks, TicketDispatchEvent};

use crate::config::ServerConfig;

pub fn create_event_hooks(config: &ServerConfig) -> EventHooks {
    let mut hooks = EventHooks::default();
    let Some(url) = config.ticket_dispatch_url.clone() else {
        warn!("🎟️ No ticket dispatch URL configured. Paid orders will not be forwarded to the ticketing backend");
        return hooks;
    };
    hooks.on_ticket_dispatch(move |ev| {
        let url = url.clone();
        Box::pin(async move {
            dispatch_tickets(ev, &url).await;
        })
    });
    hooks
}

async fn dispatch_tickets(ev: TicketDispatchEvent, url: &str) {
    let order = ev.order;
    info!("🎟️ Dispatching tickets for order {} to {}", order.id, order.email);
    let payload = json!({
        "orderId": order.id.as_str(),
        "fullName": order.full_name,
        "email": order.email,
        "eventId": order.event_id,
        "eventName": order.event_name,
        "quantity": order.quantity,
        "amount": order.amount,
    });
    let client = reqwest::Client::new();
    match client.post(url).json(&payload).send().await {
        Ok(response) if response.status().is_success() => {
            debug!("🎟️ Tickets for order {} handed to the ticketing backend", order.id);
        },
        Ok(response) => {
            error!("🎟️ Ticketing backend returned {} for order {}", response.status(), order.id);
        },
        Err(e) => {
            error!("🎟️ Could not reach the ticketing backend for order {}. {e}", order.id);
        },
    }
}
