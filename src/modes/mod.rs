pub mod handheld;

pub use handheld::HandheldMode;
