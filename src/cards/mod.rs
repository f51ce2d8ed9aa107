//! Cards module - Display card rendering

mod renderer;

pub use renderer::{CardRenderer, DisplayCard};
