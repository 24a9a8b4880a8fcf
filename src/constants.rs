// Browser front-end tuning: DOM ids and gesture sensitivities.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const HINT_OVERLAY_ID: &str = "hint-overlay";
pub const PAUSE_OVERLAY_ID: &str = "pause-overlay";
pub const LOADING_ID: &str = "loading-indicator";
pub const WIDGET_BAR_ID: &str = "widget-bar";
pub const INFO_LAYER_ID: &str = "info-layer";

// CSS classes toggled on widgets
pub const CLASS_SELECTED: &str = "selected";
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_PULSE: &str = "pulse";

// Camera gestures
pub const ORBIT_RADIANS_PER_PX: f32 = 0.008;
pub const WHEEL_ZOOM_PER_PX: f32 = 0.002;
pub const PINCH_ZOOM_PER_PX: f32 = 0.01;

// A press that moves less than this (canvas px) counts as a click, not an orbit drag
pub const CLICK_SLOP_PX: f32 = 6.0;

// Hint overlay refresh interval while perf stats are shown
pub const HINT_REFRESH_SEC: f32 = 0.5;
