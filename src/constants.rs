pub const BOARD_SIZE: u8 = 28;
pub const HALF_BOARD: u8 = 14;

/// Last turn (inclusive) of the fixed symmetric opening layout.
pub const EARLY_PHASE_CUTOFF: u32 = 10;

/// Breaches on one edge beyond this count mark that corner as overloaded.
pub const REGION_OVERLOAD_THRESHOLD: u32 = 5;

/// Structure resource required before a corner wall is demolished for a turret.
pub const TURRET_UPGRADE_MIN_STRUCTURE: f32 = 6.0;

/// Structure resource required before a wall is demolished for a support.
pub const SUPPORT_CLEAR_MIN_STRUCTURE: f32 = 4.0;

/// Structures below this health are candidates for recycling.
pub const RECYCLE_BELOW_HEALTH: f32 = 30.0;

/// Recycling only runs while own action resource is below this level.
pub const LOW_ACTION_THRESHOLD: f32 = 8.0;

/// Enemy action resource levels that trigger a two- or one-disruptor screen.
pub const SCREEN_HIGH_THREAT: f32 = 20.0;
pub const SCREEN_LOW_THREAT: f32 = 10.0;

/// Base action resource bar for launching a wave; rises by turn/10, capped.
pub const WAVE_BASE_BAR: f32 = 13.0;
pub const WAVE_BAR_CAP: f32 = 5.0;

/// Weighted frontline density above which the heavy wave is chosen.
pub const BREAKER_DENSITY_TRIGGER: f32 = 2.5;

/// Unit counts for the two wave shapes.
pub const HEAVY_WAVE_SIZE: u32 = 6;
pub const SWARM_PROBE_SIZE: u32 = 3;
