//! Constants used throughout the application

/// Number of facial landmarks for a full face
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Number of landmark points outlining one eye
pub const EYE_POINT_COUNT: usize = 6;

/// First landmark index of the left eye region (inclusive)
pub const LEFT_EYE_START: usize = 36;

/// First landmark index of the right eye region (inclusive)
pub const RIGHT_EYE_START: usize = 42;

/// Eye aspect ratio below which a frame counts as a blink
pub const DEFAULT_EAR_THRESHOLD: f64 = 0.2;

/// Number of countdown ticks before a round starts
pub const DEFAULT_COUNTDOWN_TICKS: u32 = 3;

/// Interval between countdown ticks in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Playback rate for recorded landmark streams (0 disables pacing)
pub const DEFAULT_PLAYBACK_FPS: u32 = 30;
