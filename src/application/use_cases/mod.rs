mod apply_rewrite;
mod chat_client;
mod manage_settings;
mod rewrite_script;

pub use apply_rewrite::*;
pub use chat_client::*;
pub use manage_settings::*;
pub use rewrite_script::*;
