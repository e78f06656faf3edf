//! Password generation and strength scoring.

pub mod generator;
pub mod strength;

pub use generator::{generate, generate_with_policy, PasswordPolicy};
pub use strength::{score, Strength, StrengthLabel};
