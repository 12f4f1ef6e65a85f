pub mod commands;
pub mod events;
pub mod types;

pub use commands::BackendCommand;
pub use events::BackendEvent;
pub use types::{Conversation, Message, Role};
