mod common;
mod vs_fuzzy;

pub use vs_fuzzy::run_game_vs_fuzzy;
