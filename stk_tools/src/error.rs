use thiserror::Error;

#[derive(Debug, Error)]
pub enum StkApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not reach the payment provider: {0}")]
    Transport(String),
    #[error("Provider authentication failed. Error {status}. {message}")]
    AuthDeclined { status: u16, message: String },
    #[error("no token in response")]
    NoTokenInResponse,
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Push request declined. Error {status}. {body}")]
    PushDeclined { status: u16, body: String },
}
