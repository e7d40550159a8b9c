//! Combat resolution.
//!
//! # Core Functions
//!
//! - `calculate_hit_chance` / `check_hit`: strength vs. defense on a d100
//! - `resolve_strike`: the once-per-record resolution steps of an attack
//!   (facing, cost, hit roll, conditions, damage, defender cue, synchronized
//!   animation, bookkeeping)

pub mod condition;
pub mod damage;
pub mod hit;
pub mod resolver;

pub use condition::Condition;
pub use damage::DamageKind;
pub use hit::{calculate_hit_chance, check_hit};
pub use resolver::{AttackReport, DefenderCue, Strike, resolve_strike};
