mod chat_transport;
mod script_repository;
mod settings_repository;

pub use chat_transport::*;
pub use script_repository::*;
pub use settings_repository::*;
