pub mod debounce;
pub mod handler;

pub use debounce::KeyDebouncer;
pub use handler::{InputHandler, KeyAction};
