mod commands;
mod handlers;

pub use commands::{Cli, Commands, RecordSource};
pub use handlers::{handle_call, handle_create, handle_show};
