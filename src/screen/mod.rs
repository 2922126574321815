//! The keyboard screen: one controller, its theme and cursor, an input queue
//! and the speech services, composed into a [`Scene`] each frame.

mod blink;
mod builder;
mod queue;
mod scene;
mod scr;

pub use blink::*;
pub use builder::*;
pub use queue::*;
pub use scene::*;
pub use scr::*;
