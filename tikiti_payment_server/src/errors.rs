use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use thiserror::Error;
use tikiti_payment_engine::OrderFlowError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The order has already been settled. {0}")]
    OrderAlreadySettled(String),
    #[error("The payment provider could not process the request. {0}")]
    UpstreamError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::OrderAlreadySettled(_) => StatusCode::CONFLICT,
            Self::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::ValidationError(_) => Self::InvalidRequestBody(e.to_string()),
            OrderFlowError::MalformedCallback(_) => Self::InvalidRequestBody(e.to_string()),
            OrderFlowError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::OrderAlreadyFinalized(_, _) => Self::OrderAlreadySettled(e.to_string()),
            OrderFlowError::PushFailed(_) => Self::UpstreamError(e.to_string()),
            OrderFlowError::StorageError(_) => Self::BackendError(e.to_string()),
            OrderFlowError::IllegalStatusChange { .. } => Self::BackendError(e.to_string()),
        }
    }
}
