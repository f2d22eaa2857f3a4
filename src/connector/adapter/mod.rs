mod fs_script_repository;
mod json_settings_repository;
mod mock_transport;
mod reqwest_transport;

pub use fs_script_repository::*;
pub use json_settings_repository::*;
pub use mock_transport::*;
pub use reqwest_transport::*;
