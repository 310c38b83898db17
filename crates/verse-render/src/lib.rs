//! Display regions for the verse widget and the renderer that fills them.

pub mod renderer;
pub mod surface;

pub use renderer::{Render, Renderer};
pub use surface::DisplaySurface;
