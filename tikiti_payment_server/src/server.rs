use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use stk_tools::StkApi;
use tikiti_payment_engine::{
    events::{EventHandlers, EventProducers},
    OrderFlowApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{stk::StkPushGateway, tickets::create_event_hooks},
    routes::{health, NewOrderRoute, StkCallbackRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    let hooks = create_event_hooks(&config);
    let handlers = EventHandlers::new(config.event_buffer_size, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    debug!("💻️ Event handlers started");
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let stk_api = StkApi::new(config.stk.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let gateway = StkPushGateway::new(stk_api.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("tkg::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(gateway))
            .service(health)
            .service(NewOrderRoute::<SqliteDatabase, StkPushGateway>::new())
            .service(StkCallbackRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
