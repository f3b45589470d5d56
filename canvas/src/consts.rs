//! Shared numeric and styling constants for the canvas crate.

// ── Stroke styling ──────────────────────────────────────────────

/// Stroke line width in CSS pixels.
pub const STROKE_WIDTH_PX: f64 = 5.0;

/// Stroke color while drawing.
pub const STROKE_COLOR: &str = "rgba(255, 255, 255, 1)";

/// Glow blur radius behind the stroke, in CSS pixels.
pub const STROKE_SHADOW_BLUR_PX: f64 = 10.0;

/// Glow color behind the stroke.
pub const STROKE_SHADOW_COLOR: &str = "rgba(255, 255, 255, 0.5)";

// ── Score overlay ───────────────────────────────────────────────

/// Font for the big percentage readout.
pub const SCORE_FONT: &str = "bold 72px sans-serif";

/// Overlay text color for scores above 90.
pub const SCORE_COLOR_TEAL: &str = "#2dd4bf";

/// Overlay text color for scores above 80.
pub const SCORE_COLOR_GREEN: &str = "#4ade80";

/// Overlay text color for scores above 50.
pub const SCORE_COLOR_YELLOW: &str = "#facc15";

/// Overlay text color for everything else.
pub const SCORE_COLOR_RED: &str = "#f87171";
