//! Input and state handling for keyboard events.

mod codes;
mod event;
mod keyboard;

pub use codes::*;
pub use event::*;
pub use keyboard::*;
