use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderId, OrderStatus, OrderUpdate, ProviderRefs},
    events::{EventProducers, TicketDispatchEvent},
    flow::{
        callback::{classify, CallbackDisposition, CallbackNotification, CallbackOutcome, CorrelationStrategy},
        OrderFlowError,
    },
    traits::{OrderStore, PushGateway},
};

/// The high-level API for driving orders through their lifecycle.
///
/// `OrderFlowApi` owns the order state machine. Orders enter via [`place_order`](Self::place_order) and leave
/// their non-terminal states via [`process_callback`](Self::process_callback); nothing else mutates order
/// status. All storage access goes through the backend `B`.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B: std::fmt::Debug> std::fmt::Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({:?})", self.db)
    }
}

impl<B> OrderFlowApi<B>
where B: OrderStore
{
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    /// Validate a booking, persist it as a `Pending` order, and trigger the STK push.
    ///
    /// On a successful push the order moves to `InitiatedStkPush` with the provider references recorded. If the
    /// push is declined or the provider is unreachable, the order is marked `Failed` (best effort) and the push
    /// error is returned to the caller.
    pub async fn place_order<P: PushGateway>(&self, booking: NewOrder, gateway: &P) -> Result<Order, OrderFlowError> {
        booking.validate()?;
        let order = self.db.insert_order(booking).await?;
        info!("🛒️ Order {} created for {} ({})", order.id, order.full_name, order.amount);
        match gateway.initiate_push(&order).await {
            Ok(refs) => {
                debug!("📲️ Push accepted for order {}. Provider txn id: {:?}", order.id, refs.txn_id);
                self.mark_push_initiated(&order.id, refs).await
            },
            Err(e) => {
                warn!("📲️ Push was not accepted for order {}. {e}", order.id);
                if let Err(update_err) = self.mark_push_failed(&order.id, &e.to_string()).await {
                    // The order stays Pending. An operator can retry or cancel it manually.
                    error!("🛒️ Could not mark order {} as failed after a push error. {update_err}", order.id);
                }
                Err(e.into())
            },
        }
    }

    /// Move a `Pending` order to `InitiatedStkPush`, recording the provider references.
    async fn mark_push_initiated(&self, id: &OrderId, refs: ProviderRefs) -> Result<Order, OrderFlowError> {
        let order = self.db.fetch_order_by_id(id).await?.ok_or_else(|| OrderFlowError::OrderNotFound(id.to_string()))?;
        if order.status != OrderStatus::Pending {
            return Err(OrderFlowError::IllegalStatusChange {
                order_id: id.clone(),
                from: order.status,
                to: OrderStatus::InitiatedStkPush,
            });
        }
        let update = OrderUpdate::default().with_status(OrderStatus::InitiatedStkPush).with_provider_refs(&refs);
        let order =
            self.db.update_order(id, update).await?.ok_or_else(|| OrderFlowError::OrderNotFound(id.to_string()))?;
        Ok(order)
    }

    /// Move a `Pending` order to `Failed` after the push could not be delivered.
    async fn mark_push_failed(&self, id: &OrderId, reason: &str) -> Result<Order, OrderFlowError> {
        let order = self.db.fetch_order_by_id(id).await?.ok_or_else(|| OrderFlowError::OrderNotFound(id.to_string()))?;
        if order.status != OrderStatus::Pending {
            return Err(OrderFlowError::IllegalStatusChange {
                order_id: id.clone(),
                from: order.status,
                to: OrderStatus::Failed,
            });
        }
        let update = OrderUpdate::default().with_status(OrderStatus::Failed).with_error_message(reason);
        let order =
            self.db.update_order(id, update).await?.ok_or_else(|| OrderFlowError::OrderNotFound(id.to_string()))?;
        Ok(order)
    }

    /// Settle an order from a raw provider callback body.
    ///
    /// The callback is parsed, correlated to an order, and classified. Terminal callbacks finalize the order in a
    /// single update that also records the callback audit fields. Duplicate notifications are acknowledged without
    /// touching the order. Ticket dispatch fires when, and only when, the order lands on `Paid`.
    pub async fn process_callback(&self, raw_body: &str) -> Result<CallbackOutcome, OrderFlowError> {
        let notification = CallbackNotification::from_json(raw_body)?;
        debug!(
            "📨️ Callback received. status code {}, message {:?}",
            notification.status_code, notification.message
        );
        let order = self.resolve_order(&notification).await?;
        let disposition = classify(notification.status_code, &notification.message);
        match disposition {
            CallbackDisposition::Duplicate => {
                info!("📨️ Duplicate notification for order {}. No changes made.", order.id);
                Ok(CallbackOutcome::AlreadyProcessed(order))
            },
            CallbackDisposition::Terminal(new_status) => {
                if order.status.is_terminal() {
                    warn!(
                        "📨️ Callback wants to move order {} to {new_status}, but it is already {}",
                        order.id, order.status
                    );
                    return Err(OrderFlowError::OrderAlreadyFinalized(order.id, order.status));
                }
                let order = self.finalize_order(order, new_status, &notification).await?;
                if order.status == OrderStatus::Paid {
                    self.call_ticket_dispatch_hook(&order).await;
                }
                Ok(CallbackOutcome::Finalized(order))
            },
        }
    }

    /// Try each correlation strategy in order until one yields an order.
    async fn resolve_order(&self, notification: &CallbackNotification) -> Result<Order, OrderFlowError> {
        let strategies = notification.correlation_strategies();
        if strategies.is_empty() {
            return Err(OrderFlowError::MalformedCallback("No usable identifiers in callback".to_string()));
        }
        for strategy in &strategies {
            let found = match strategy {
                CorrelationStrategy::OrderId(id) => {
                    let id = OrderId::from(id.clone());
                    self.db.fetch_order_by_id(&id).await?
                },
                CorrelationStrategy::ProviderTxnId(txn_id) => self.db.fetch_order_by_provider_txn_id(txn_id).await?,
            };
            if let Some(order) = found {
                trace!("📨️ Callback matched order {} via {strategy:?}", order.id);
                return Ok(order);
            }
        }
        Err(OrderFlowError::OrderNotFound(format!("{strategies:?}")))
    }

    /// Apply the terminal status, callback audit trail and any fresher provider references in one update.
    async fn finalize_order(
        &self,
        order: Order,
        new_status: OrderStatus,
        notification: &CallbackNotification,
    ) -> Result<Order, OrderFlowError> {
        let mut update = OrderUpdate::default().with_status(new_status).with_callback_audit(
            &notification.raw,
            notification.status_code,
            &notification.message,
        );
        let refs = ProviderRefs {
            txn_id: notification.provider_txn_id.clone().or_else(|| order.provider_txn_id.clone()),
            merchant_txn_id: notification.merchant_ref.clone().or_else(|| order.provider_merchant_txn_id.clone()),
        };
        update = update.with_provider_refs(&refs);
        if new_status != OrderStatus::Paid {
            update = update.with_error_message(&notification.message);
        }
        let order = self
            .db
            .update_order(&order.id, update)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(order.id.to_string()))?;
        info!("📨️ Order {} finalized as {}", order.id, order.status);
        Ok(order)
    }

    async fn call_ticket_dispatch_hook(&self, order: &Order) {
        let n = self.producers.ticket_dispatch_producer.len();
        debug!("🎟️ Notifying {n} ticket dispatch subscriber(s) for order {}", order.id);
        for producer in &self.producers.ticket_dispatch_producer {
            let event = TicketDispatchEvent::new(order.clone());
            producer.publish_event(event).await;
        }
    }
}
