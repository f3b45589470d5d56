//! Rendering: draws the in-progress stroke and the score overlay.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only engine
//! state and produces pixels — it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use scoring::{Point, Tier};

use crate::consts::{
    SCORE_COLOR_GREEN, SCORE_COLOR_RED, SCORE_COLOR_TEAL, SCORE_COLOR_YELLOW, SCORE_FONT,
    STROKE_COLOR, STROKE_SHADOW_BLUR_PX, STROKE_SHADOW_COLOR, STROKE_WIDTH_PX,
};
use crate::engine::EngineCore;
use crate::input::GestureState;

/// Draw the full scene: clear, then the active stroke, then the score
/// overlay (only one of the latter two is normally visible — the score is
/// cleared when a new gesture starts).
///
/// # Errors
///
/// Propagates any `Canvas2D` failure.
pub fn draw_scene(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let surface = core.surface;

    // Scale for the device pixel ratio so all drawing below is in CSS pixels.
    ctx.set_transform(surface.dpr, 0.0, 0.0, surface.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, surface.width, surface.height);

    if let GestureState::Drawing { stroke } = core.gesture() {
        draw_stroke(ctx, stroke.points());
    }

    if let Some(score) = core.ui.score {
        draw_score_overlay(ctx, surface.width, surface.height, score)?;
    }

    Ok(())
}

/// Draw the captured points as a single round-capped polyline.
fn draw_stroke(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let Some(first) = points.first() else {
        return;
    };

    ctx.set_line_width(STROKE_WIDTH_PX);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_stroke_style_str(STROKE_COLOR);
    ctx.set_shadow_blur(STROKE_SHADOW_BLUR_PX);
    ctx.set_shadow_color(STROKE_SHADOW_COLOR);

    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in &points[1..] {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();

    ctx.set_shadow_blur(0.0);
}

/// Draw the percentage readout centered on the surface, colored by tier.
fn draw_score_overlay(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    score: f64,
) -> Result<(), JsValue> {
    ctx.set_font(SCORE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(tier_color(Tier::for_score(score)));
    ctx.fill_text(&format!("{score:.1}%"), width * 0.5, height * 0.5)
}

/// Overlay color for a score tier, matching the game's grading palette.
fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Perfect | Tier::Incredible => SCORE_COLOR_TEAL,
        Tier::Great => SCORE_COLOR_GREEN,
        Tier::Decent => SCORE_COLOR_YELLOW,
        Tier::TryAgain => SCORE_COLOR_RED,
    }
}
