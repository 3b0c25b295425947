pub mod display;
pub mod renderer;

pub use display::Display;
pub use renderer::Renderer;
