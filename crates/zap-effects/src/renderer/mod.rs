pub mod canvas;
pub mod instance;

pub use canvas::Canvas;
pub use instance::{RenderBuffer, RenderInstance};
