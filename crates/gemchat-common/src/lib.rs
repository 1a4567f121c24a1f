pub mod errors;
pub mod id;

pub use errors::{ConfigError, GemchatError};
pub use id::{new_correlation_id, new_id, SessionId};
