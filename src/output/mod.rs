//! Plan output (text and JSON rendering)

pub mod plan;
pub mod terminal;

pub use plan::{render, render_json, render_text, RenderOptions};
pub use terminal::Painter;
