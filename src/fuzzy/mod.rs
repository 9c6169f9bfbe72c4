// Fuzzy paddle controller: membership functions, rule table, inference

mod controller;
mod membership;
mod rules;

pub use controller::{FuzzyController, Inference};
pub use membership::MembershipFn;
pub use rules::{default_rules, Rule, VelocityTerm, XDiffTerm, YDiffTerm};
