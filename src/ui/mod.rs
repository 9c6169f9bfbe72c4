pub mod braille;
pub mod hud;
pub mod overlay;
pub mod render;

pub use hud::fuzzy_hud;
pub use overlay::OverlayMessage;
pub use render::{controls_hint, render, Palette};
