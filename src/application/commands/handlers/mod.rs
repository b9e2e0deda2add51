//! Command Handlers 实现

mod audio_handlers;
mod smoke_handlers;

pub use audio_handlers::*;
pub use smoke_handlers::*;
