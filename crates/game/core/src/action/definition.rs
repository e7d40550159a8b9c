//! Action definitions - immutable configuration for one action kind.
//!
//! Definitions are decoded by the content layer (RON files) and shared
//! read-only by every instance of that kind.

use crate::combat::DamageKind;
use crate::env::SoundMap;

/// Configuration of a basic attack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionDefinition {
    /// Unique name; also the registry key and the record's action name.
    pub name: String,

    /// Kind of the damage dealt on hit.
    pub damage_kind: DamageKind,

    /// Action points spent per use.
    pub ap_cost: i32,

    /// Uses before running dry. 0 means unlimited.
    pub ammo: i32,

    /// Attack strength rolled against the target's defense.
    pub strength: i32,

    /// Maximum Chebyshev distance to the target.
    pub range: i32,

    /// Health removed on hit.
    pub damage: i32,

    /// Animation the attacker plays.
    pub animation: String,

    /// Conditions applied to the target on hit, by name.
    pub conditions: Vec<String>,

    /// Icon texture reference.
    pub icon: String,

    /// Symbolic sound names mapped when the action is prepped.
    pub sounds: SoundMap,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_ap_cost(mut self, ap_cost: i32) -> Self {
        self.ap_cost = ap_cost;
        self
    }

    pub fn with_ammo(mut self, ammo: i32) -> Self {
        self.ammo = ammo;
        self
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_range(mut self, range: i32) -> Self {
        self.range = range;
        self
    }

    pub fn with_damage(mut self, damage: i32, kind: DamageKind) -> Self {
        self.damage = damage;
        self.damage_kind = kind;
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = animation.into();
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    pub fn with_sound(mut self, cue: impl Into<String>, asset: impl Into<String>) -> Self {
        self.sounds.insert(cue.into(), asset.into());
        self
    }

    /// Ammo an instance starts with: the capacity, or the unlimited sentinel
    /// when the capacity is 0 (or negative).
    pub fn initial_ammo(&self) -> i32 {
        if self.ammo > 0 {
            self.ammo
        } else {
            crate::config::CombatConfig::UNLIMITED_AMMO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ammo_means_unlimited() {
        assert_eq!(ActionDefinition::new("punch").initial_ammo(), -1);
        assert_eq!(ActionDefinition::new("pistol").with_ammo(6).initial_ammo(), 6);
    }
}
