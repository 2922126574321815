//! Pointer, physical key and speech input.

pub mod keyboard;
