//! Action kind enumeration.

/// Behavior family of an action.
///
/// Each variant has one concrete implementation of the action contract; many
/// differently named definitions may share a kind.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    /// Single-target, instant attack (melee or ranged).
    BasicAttack,
}
