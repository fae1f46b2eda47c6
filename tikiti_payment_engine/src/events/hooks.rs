use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, TicketDispatchEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub ticket_dispatch_producer: Vec<EventProducer<TicketDispatchEvent>>,
}

pub struct EventHandlers {
    pub on_ticket_dispatch: Option<EventHandler<TicketDispatchEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_ticket_dispatch = hooks.on_ticket_dispatch.map(|f| EventHandler::new(buffer_size, f));
        Self { on_ticket_dispatch }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_ticket_dispatch {
            result.ticket_dispatch_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_ticket_dispatch {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_ticket_dispatch: Option<Handler<TicketDispatchEvent>>,
}

impl EventHooks {
    pub fn on_ticket_dispatch<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(TicketDispatchEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_ticket_dispatch = Some(Arc::new(f));
        self
    }
}
