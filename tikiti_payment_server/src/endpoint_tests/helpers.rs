use actix_web::{http::StatusCode, test, web, App};
use serde_json::Value;
use tikiti_payment_engine::{events::EventProducers, test_utils::prepare_test_env, OrderFlowApi, SqliteDatabase};

use crate::{
    endpoint_tests::mocks::MockGateway,
    routes::{health, NewOrderRoute, StkCallbackRoute},
};

/// Spin up a fresh, migrated database for one test.
pub async fn new_test_db() -> SqliteDatabase {
    let _ = env_logger::try_init().ok();
    let url = prepare_test_env().await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error opening test database")
}

pub fn new_api(db: &SqliteDatabase) -> OrderFlowApi<SqliteDatabase> {
    OrderFlowApi::new(db.clone(), EventProducers::default())
}

/// POST a JSON payload to the app and return the response status and body.
pub async fn post_json(db: &SqliteDatabase, gateway: MockGateway, path: &str, payload: Value) -> (StatusCode, String) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(new_api(db)))
            .app_data(web::Data::new(gateway))
            .service(health)
            .service(NewOrderRoute::<SqliteDatabase, MockGateway>::new())
            .service(StkCallbackRoute::<SqliteDatabase>::new()),
    )
    .await;
    let req = test::TestRequest::post().uri(path).set_json(payload).to_request();
    let res = test::call_service(&app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).to_string())
}
