//! Hit chance calculations.

use crate::config::CombatConfig;

/// Calculate hit chance from attack strength vs. defender defense.
///
/// # Formula
///
/// ```text
/// hit_chance = base + (strength - defense) * per_point
/// clamped to [min, max], both capped at 100
/// ```
///
/// # Returns
///
/// Hit chance as percentage
pub fn calculate_hit_chance(strength: i32, defense: i32, config: &CombatConfig) -> u32 {
    let stat_diff = strength.saturating_sub(defense);
    let hit_chance = config
        .hit_base
        .saturating_add(stat_diff.saturating_mul(config.hit_per_point));

    let max = config.hit_max.min(100);
    let min = config.hit_min.min(max);
    hit_chance.clamp(min as i32, max as i32) as u32
}

/// Check if an attack hits given a d100 roll (1-100 inclusive).
///
/// A chance of 100 always hits, a chance of 0 never does.
pub fn check_hit(strength: i32, defense: i32, roll: u32, config: &CombatConfig) -> bool {
    roll <= calculate_hit_chance(strength, defense, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_scales_with_strength_difference() {
        let config = CombatConfig::default();
        assert_eq!(calculate_hit_chance(5, 5, &config), 50);
        assert_eq!(calculate_hit_chance(7, 5, &config), 70);
        assert_eq!(calculate_hit_chance(2, 5, &config), 20);
    }

    #[test]
    fn chance_is_clamped() {
        let config = CombatConfig::default();
        assert_eq!(calculate_hit_chance(50, 0, &config), 100);
        assert_eq!(calculate_hit_chance(0, 50, &config), 0);
    }

    #[test]
    fn extreme_chances_are_certain() {
        let config = CombatConfig::default();
        assert!((1..=100).all(|roll| check_hit(50, 0, roll, &config)));
        assert!((1..=100).all(|roll| !check_hit(0, 50, roll, &config)));
    }

    #[test]
    fn oversized_clamp_is_capped_at_certainty() {
        let config = CombatConfig {
            hit_min: 200,
            hit_max: 3_000_000_000,
            ..CombatConfig::default()
        };
        assert_eq!(calculate_hit_chance(5, 0, &config), 100);
        assert_eq!(calculate_hit_chance(-50, 0, &config), 100);
    }
}
