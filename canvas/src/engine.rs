use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use scoring::{Point, Stroke, circularity_score};

use crate::input::{Button, GestureState, UiState};
use crate::render;
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    /// A gesture completed and its stroke was scored. Raised exactly once
    /// per completed gesture; the host forwards the score to its
    /// scoreboard (and session-best tracker, if it keeps one).
    Scored {
        /// Final circularity score in `[0, 100]`.
        score: f64,
    },
    /// The scene changed; the host should schedule a repaint.
    RenderNeeded,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub surface: Surface,
    pub gesture: GestureState,
    pub ui: UiState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Update the capture surface's client bounds and device pixel ratio.
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64, dpr: f64) {
        self.surface.set_bounds(left, top, width, height, dpr);
    }

    // --- Input events ---

    /// Handle pointer-down: begin a new gesture at the pressed position.
    ///
    /// Only the primary button draws. The stroke is reset to contain just
    /// the translated press point, and any prior score display is cleared.
    /// A pointer-down while already drawing restarts the gesture; the
    /// previous in-progress stroke becomes unreachable.
    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let local = self.surface.client_to_local(client_pt);
        self.ui.score = None;
        self.gesture = GestureState::Drawing { stroke: Stroke::begin_at(local) };
        vec![Action::RenderNeeded]
    }

    /// Handle pointer-move: append the translated position to the stroke.
    ///
    /// Every reported move event contributes exactly one point — no
    /// deduplication, no resampling, no minimum-distance filter. A move
    /// while `Idle` is a no-op.
    pub fn on_pointer_move(&mut self, client_pt: Point) -> Vec<Action> {
        let GestureState::Drawing { stroke } = &mut self.gesture else {
            return Vec::new();
        };
        stroke.push(self.surface.client_to_local(client_pt));
        vec![Action::RenderNeeded]
    }

    /// Handle pointer-up: finish the gesture and score the stroke.
    ///
    /// The release position is not part of the stroke; the last captured
    /// move is the stroke's final point. A release while `Idle` is an
    /// idempotent no-op. Non-primary releases are ignored.
    pub fn on_pointer_up(&mut self, _client_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.finish_gesture()
    }

    /// The pointer left the capture surface, which ends the gesture exactly
    /// like a release. A leave while `Idle` is a no-op.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Score the accumulated stroke exactly once and return to `Idle`.
    fn finish_gesture(&mut self) -> Vec<Action> {
        let GestureState::Drawing { stroke } = std::mem::take(&mut self.gesture) else {
            return Vec::new();
        };
        let score = circularity_score(stroke.points());
        self.ui.score = Some(score);
        vec![Action::Scored { score }, Action::RenderNeeded]
    }

    // --- Queries ---

    /// The current gesture state.
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Whether a gesture is currently being captured.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_drawing()
    }

    /// Score of the most recently completed gesture, if it is still on
    /// display (cleared when a new gesture starts).
    #[must_use]
    pub fn last_score(&self) -> Option<f64> {
        self.ui.score
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Viewport ---

    /// Update surface bounds and resize the canvas backing store to match
    /// the display size at the current device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64, dpr: f64) {
        self.core.set_viewport(left, top, width, height, dpr);
        self.canvas.set_width((width * dpr).max(0.0) as u32);
        self.canvas.set_height((height * dpr).max(0.0) as u32);
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(client_pt, button)
    }

    pub fn on_pointer_move(&mut self, client_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(client_pt)
    }

    pub fn on_pointer_up(&mut self, client_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(client_pt, button)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Propagates any `Canvas2D` failure from the rendering layer.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Ok(());
        };
        let ctx = ctx.dyn_into::<web_sys::CanvasRenderingContext2d>().map_err(JsValue::from)?;
        render::draw_scene(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.core.is_drawing()
    }

    #[must_use]
    pub fn last_score(&self) -> Option<f64> {
        self.core.last_score()
    }
}
