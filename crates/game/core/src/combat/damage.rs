//! Damage kinds.

// ============================================================================
// Damage Kind
// ============================================================================

/// Kind of harm an action deals.
///
/// Stats collaborators may treat kinds differently (resistances, immunities).
/// Action-point deductions are always reported as [`DamageKind::Unspecified`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    /// No particular kind (resource bookkeeping, generic harm).
    #[default]
    Unspecified,
    /// Blades, fists, projectiles.
    Physical,
    /// Burns and explosions.
    Fire,
    /// Toxins and venom.
    Poison,
    /// Fear-based harm.
    Terror,
    /// Mind-affecting harm.
    Panic,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(DamageKind::from_str("fire").unwrap(), DamageKind::Fire);
        assert_eq!(DamageKind::from_str("Terror").unwrap(), DamageKind::Terror);
        assert_eq!(DamageKind::Physical.as_ref(), "physical");
        assert!(DamageKind::from_str("laser").is_err());
    }
}
