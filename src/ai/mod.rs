// AI module for the fuzzy-logic opponent

mod fuzzy_bot;

pub use fuzzy_bot::FuzzyBot;
