pub mod errors;
pub mod id;

pub use errors::{BridgeError, ConfigError, MapViewError};
pub use id::{new_correlation_id, ViewId};

pub type Result<T> = std::result::Result<T, MapViewError>;
