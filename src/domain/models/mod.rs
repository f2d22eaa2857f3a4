mod chat_message;
mod chat_request;
mod chat_response;
mod rewrite_proposal;
mod script_encoding;
mod script_task;
mod settings;

pub use chat_message::*;
pub use chat_request::*;
pub use chat_response::*;
pub use rewrite_proposal::*;
pub use script_encoding::*;
pub use script_task::*;
pub use settings::*;
