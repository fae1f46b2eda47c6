//! Stateless pub-sub plumbing for engine events.
//!
//! Components subscribe to engine events (currently only the ticket-dispatch event) by registering an async handler.
//! Handlers receive the event value and nothing else; they have no access to engine state, which keeps a misbehaving
//! handler from corrupting an already-committed order.
use std::{
    future::Future,
    pin::Pin,
    sync::{atomic::AtomicI64, Arc},
};

use log::*;
use tokio::sync::mpsc;

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, receiver) = mpsc::channel(buffer_size);
        Self { listener: receiver, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Consume events until every producer has been dropped, then drain the in-flight handler tasks and shut down.
    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // The internal sender must go, otherwise the recv loop below never terminates.
        drop(self.sender);
        let in_flight = Arc::new(AtomicI64::new(0));
        while let Some(ev) = self.listener.recv().await {
            trace!("📬️ Handling event");
            let handler = Arc::clone(&self.handler);
            in_flight.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let counter = Arc::clone(&in_flight);
            tokio::spawn(async move {
                (handler)(ev).await;
                counter.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                trace!("📬️ Event handled");
            });
        }
        let drain = tokio::spawn(async move {
            while in_flight.load(std::sync::atomic::Ordering::SeqCst) > 0 {
                debug!("📬️ Waiting for in-flight event handlers to complete");
                tokio::time::sleep(tokio::time::Duration::from_millis(1000)).await;
            }
        });
        match drain.await {
            Ok(_) => debug!("📬️ Event handler shut down gracefully"),
            Err(e) => warn!("📬️ Event handler drain task failed: {e}. Logging this just in case."),
        }
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to send event: {e}");
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::AtomicU64;

    use super::*;

    #[tokio::test]
    async fn fan_in_from_multiple_producers() {
        let _ = env_logger::try_init();
        let total = Arc::new(AtomicU64::new(0));
        let tally = total.clone();
        let handler = Arc::new(move |v: u64| {
            let total = total.clone();
            Box::pin(async move {
                total.fetch_add(v, std::sync::atomic::Ordering::SeqCst);
                tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            }) as Pin<Box<dyn Future<Output = ()> + Send>>
        });
        let event_handler = EventHandler::new(2, handler);
        let producer_a = event_handler.subscribe();
        let producer_b = event_handler.subscribe();
        tokio::spawn(async move {
            for i in 1..=4u64 {
                producer_a.publish_event(i).await;
            }
        });
        tokio::spawn(async move {
            for i in 5..=8u64 {
                producer_b.publish_event(i).await;
            }
        });
        event_handler.start_handler().await;
        assert_eq!(tally.load(std::sync::atomic::Ordering::SeqCst), 36);
    }
}
