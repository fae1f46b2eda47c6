mod helpers;
mod money;
mod secret;

pub use helpers::parse_boolean_flag;
pub use money::{KesAmount, KesConversionError, KES_CURRENCY_CODE};
pub use secret::Secret;
