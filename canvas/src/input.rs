//! Input model: mouse buttons, the gesture state machine, and the UI state
//! the renderer reads.
//!
//! One gesture is one continuous press-drag-release interaction. The state
//! machine has exactly two states: between gestures the engine is `Idle`;
//! from pointer-down to pointer-up (or pointer-leave) it is `Drawing` and
//! owns the in-progress stroke exclusively.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use scoring::Stroke;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch contact).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiState {
    /// Score of the most recently completed gesture. Cleared the moment a
    /// new gesture starts, so the overlay never shows a stale score behind
    /// an in-progress stroke.
    pub score: Option<f64>,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A continuous press-drag gesture is being captured.
    Drawing {
        /// Points captured so far, in surface-local coordinates and
        /// arrival order. Replaced wholesale when a new gesture starts,
        /// making the previous stroke unreachable.
        stroke: Stroke,
    },
}

impl GestureState {
    /// Whether a gesture is currently being captured.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
