pub mod constants;
pub mod error;
pub mod follower;
pub mod host;
pub mod magnet;
pub mod manual;
pub mod mount;
pub mod scatter;
pub mod scroll;
pub mod smoothing;
pub mod style;
pub mod trail;

pub use constants::*;
pub use error::{ChaosError, Result};
pub use follower::{Follower, FollowerConfig, Warmup};
pub use host::{
    Animate, FrameCallback, FrameHandle, FrameScheduler, FrameTick, InputListener, InputSource,
    RenderSink, SubscriptionId,
};
pub use magnet::{magnet_offset, Magnet};
pub use manual::{ManualInput, ManualScheduler};
pub use mount::{Mounted, MountedFollower, Phase};
pub use scatter::{crack_path, scatter, Bounds, Placement};
pub use scroll::scroll_progress;
pub use smoothing::{Lerp, Smoothing, SmoothingFactor};
pub use style::{scale_x_css, translate_css, Appearance, BlendMode, CursorStyle, Preset};
pub use trail::{Trail, TrailPoints};
