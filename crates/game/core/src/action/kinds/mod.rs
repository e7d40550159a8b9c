//! Concrete action kinds.

pub mod basic_attack;

pub use basic_attack::BasicAttack;
