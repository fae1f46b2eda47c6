//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use tikiti_payment_engine::{
    flow::CallbackOutcome,
    traits::{OrderStore, PushGateway},
    OrderFlowApi,
};

use crate::{
    data_objects::{JsonResponse, NewOrderRequest, OrderCreatedResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Orders  ----------------------------------------------------
route!(new_order => Post "/order" impl OrderStore, PushGateway);
/// Route handler for new ticket orders.
///
/// The booking is validated, stored, and an STK push is fired at the payer's phone. The response reports the order
/// id the frontend should poll, along with the provider transaction id when the push was accepted.
pub async fn new_order<B: OrderStore, P: PushGateway>(
    api: web::Data<OrderFlowApi<B>>,
    gateway: web::Data<P>,
    body: web::Json<NewOrderRequest>,
) -> Result<HttpResponse, ServerError> {
    let booking = body.into_inner();
    debug!("💻️ New order from {} for event {}", booking.full_name, booking.event_id);
    let order = api.place_order(booking.into(), gateway.get_ref()).await?;
    Ok(HttpResponse::Ok().json(OrderCreatedResponse::from(&order)))
}

// ---------------------------------------------   Callback  ---------------------------------------------------
route!(stk_callback => Post "/stk/callback" impl OrderStore);
/// Route handler for the provider's asynchronous STK callback.
///
/// The body is taken raw rather than as a typed payload. The provider's schema drifts, and the engine wants the
/// exact bytes for the audit trail in any case.
pub async fn stk_callback<B: OrderStore>(
    api: web::Data<OrderFlowApi<B>>,
    body: web::Bytes,
) -> Result<HttpResponse, ServerError> {
    let body = String::from_utf8(body.to_vec()).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))?;
    trace!("💻️ STK callback received: {body}");
    let outcome = api.process_callback(&body).await?;
    let response = match outcome {
        CallbackOutcome::Finalized(order) => JsonResponse::success(format!("Order {} is {}", order.id, order.status)),
        CallbackOutcome::AlreadyProcessed(order) => {
            JsonResponse::success(format!("Order {} was already processed", order.id))
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
