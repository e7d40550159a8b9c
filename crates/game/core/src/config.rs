/// Combat configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit chance (percent) when strength equals defense.
    pub hit_base: i32,
    /// Hit chance gained per point of strength above defense.
    pub hit_per_point: i32,
    /// Lower clamp for hit chance.
    pub hit_min: u32,
    /// Upper clamp for hit chance. 100 means a roll can never miss.
    pub hit_max: u32,
    /// Ticks a single animation command keeps a sprite busy.
    pub animation_ticks: u32,
    /// Radius (Chebyshev) of the cells an entity can see.
    pub vision_radius: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_CONDITIONS: usize = 8;

    // ===== symbolic names shared with presentation =====
    /// Sprite state meaning "idle and able to start a new animation".
    pub const READY_STATE: &'static str = "ready";
    /// Barrier at which attacker and defender animations are released together.
    pub const SYNC_BARRIER: &'static str = "hit";
    /// First command of every defender animation list.
    pub const DEFEND_ANIMATION: &'static str = "defend";

    /// Internal ammo sentinel for "never runs out".
    pub const UNLIMITED_AMMO: i32 = -1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HIT_BASE: i32 = 50;
    pub const DEFAULT_HIT_PER_POINT: i32 = 10;
    pub const DEFAULT_ANIMATION_TICKS: u32 = 2;
    pub const DEFAULT_VISION_RADIUS: u32 = 16;

    pub fn new() -> Self {
        Self {
            hit_base: Self::DEFAULT_HIT_BASE,
            hit_per_point: Self::DEFAULT_HIT_PER_POINT,
            hit_min: 0,
            hit_max: 100,
            animation_ticks: Self::DEFAULT_ANIMATION_TICKS,
            vision_radius: Self::DEFAULT_VISION_RADIUS,
        }
    }

    pub fn with_animation_ticks(mut self, animation_ticks: u32) -> Self {
        self.animation_ticks = animation_ticks;
        self
    }

    pub fn with_vision_radius(mut self, vision_radius: u32) -> Self {
        self.vision_radius = vision_radius;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
