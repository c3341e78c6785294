pub mod palette;
pub mod renderer;

pub use renderer::{BootPhase, Chrome, Renderer};
