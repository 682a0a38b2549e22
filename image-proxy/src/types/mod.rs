mod environment;
mod error;
mod server_config;

pub use environment::{Environment, StorageBackend};
pub use error::AppError;
pub use server_config::ServerConfig;
