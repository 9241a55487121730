/// Target spawn positions.  All randomness comes through the injected RNG so
/// callers control determinism.
use rand::Rng;

use crate::config::GameConfig;

/// Horizontal centre for a new target, uniform over
/// `[radius, screen_width - radius]` so the whole circle starts on screen.
pub fn target_x(config: &GameConfig, rng: &mut impl Rng) -> i32 {
    let min = config.target_radius;
    let max = (config.screen_width - config.target_radius).max(min);
    rng.gen_range(min..=max)
}

/// Targets always enter at the top edge.
pub fn target_origin(config: &GameConfig, rng: &mut impl Rng) -> (i32, i32) {
    (target_x(config, rng), 0)
}
