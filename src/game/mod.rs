pub mod input;
pub mod physics;
pub mod state;

pub use input::{poll_input, InputAction};
pub use physics::{update_with_events, PhysicsEvents};
pub use state::{GameState, Player};
