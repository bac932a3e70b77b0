// Shared tuning constants for followers, used by both web and native hosts.

// Smoothing (fraction of remaining distance closed per frame)
pub const DEFAULT_SMOOTHING: f32 = 0.15;
pub const CURSOR_FOLLOWER_SMOOTHING: f32 = 0.15;
pub const CURSOR_MAGNET_SMOOTHING: f32 = 0.2;
pub const GHOST_LAYER_SMOOTHING: f32 = 0.08; // deliberately laggy
pub const SCROLL_INDICATOR_SMOOTHING: f32 = 0.1;

// Trail
pub const TRAIL_HEAD_SMOOTHING: f32 = 0.35;
pub const TRAIL_FALLOFF: f32 = 0.85; // each link's factor relative to the one ahead
pub const TRAIL_DEFAULT_LINKS: usize = 8;
pub const TRAIL_MIN_SMOOTHING: f32 = 0.02; // keep tail links from freezing

// Magnet
pub const MAGNET_RADIUS_PX: f32 = 120.0;
pub const MAGNET_STRENGTH: f32 = 0.35;

// Visual sizing (CSS px)
pub const DOT_SIZE_PX: f32 = 8.0;
pub const RING_SIZE_PX: f32 = 32.0;
pub const CROSSHAIR_SIZE_PX: f32 = 24.0;
pub const GHOST_SIZE_PX: f32 = 48.0;

// Distance below which a follower is considered at rest
pub const SETTLE_EPSILON_PX: f32 = 0.5;

// Nominal display refresh used when converting time constants
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
