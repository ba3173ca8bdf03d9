mod captured;
mod config;
mod event;
mod session;

pub use captured::*;
pub use config::*;
pub use event::*;
pub use session::*;
