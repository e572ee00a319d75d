//! Tunables for the placement search. Kept separate from [`crate::Engine`]
//! so a host can swap scoring behavior without touching registry state.

/// Scoring weights used by [`crate::placement::find_best_placement`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Added to a candidate's score when the container's zone matches the
    /// item's preferred zone.
    pub preferred_zone_bonus: f64,
    /// Subtracted from a candidate's score per centimeter of depth into the
    /// container, favoring placements near the open face.
    pub depth_penalty_weight: f64,
}

/// The weights used throughout `SPEC_FULL.md`'s worked examples: a zone
/// match is worth fifty priority points, and each centimeter of depth costs
/// half a point.
pub const DEFAULT_ENGINE_CONFIG: EngineConfig = EngineConfig {
    preferred_zone_bonus: 50.0,
    depth_penalty_weight: 0.5,
};

impl Default for EngineConfig {
    fn default() -> Self {
        DEFAULT_ENGINE_CONFIG
    }
}
