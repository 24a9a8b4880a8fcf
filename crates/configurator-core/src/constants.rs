use glam::Vec3;

// Shared tuning constants used by the coordinators and both front ends.

// Accessory swap
pub const SWAP_FADE_SEC: f32 = 0.5; // each phase: fade-out old, fade-in new
pub const POP_IN_SEC: f32 = 0.3;
pub const POP_IN_OFFSET: f32 = 0.1; // left part starts at -X, right part at +X

// Feature hotspots
pub const HIGHLIGHT_FADE_SEC: f32 = 0.25;
pub const DEFAULT_HIGHLIGHT_INTENSITY: f32 = 1.5;
pub const DEFAULT_PICK_RADIUS: f32 = 0.12;
pub const WINDOW_FADE_SEC: f32 = 0.3;
pub const WINDOW_HEIGHT_OFFSET: f32 = 0.35; // info window sits this far above the anchor
pub const ACTIVATION_HOLD_SEC: f32 = 3.0;

// UI
pub const NAVIGATION_DELAY_SEC: f32 = 1.0;

// Session
pub const PERF_SMOOTHING: f32 = 0.1; // new = (1-α)*old + α*sample

// Orbit camera
pub const CAMERA_DEFAULT_DISTANCE: f32 = 2.2;
pub const CAMERA_MIN_DISTANCE: f32 = 1.0;
pub const CAMERA_MAX_DISTANCE: f32 = 5.0;
pub const CAMERA_PITCH_LIMIT: f32 = 1.4; // radians, keeps the eye off the poles
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;

#[inline]
pub fn pop_in_offset(left: bool) -> Vec3 {
    if left {
        Vec3::new(-POP_IN_OFFSET, 0.0, 0.0)
    } else {
        Vec3::new(POP_IN_OFFSET, 0.0, 0.0)
    }
}
