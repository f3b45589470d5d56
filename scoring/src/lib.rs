//! Stroke model and circularity scoring for the circle-drawing game.
//!
//! This crate owns the data shared by the `canvas` engine and the `cli`
//! tools: the point/stroke model, the pure scoring pipeline that turns a
//! captured stroke into a 0–100 circularity score, the presentation tiers
//! derived from a score, and a small JSON codec so strokes can live in
//! files. It has no browser or I/O dependencies, so every consumer can
//! unit-test against it directly.
//!
//! The scorer is total over finite inputs: any ordered sequence of
//! finite-coordinate points produces a value in `[0.0, 100.0]`, with the
//! degenerate cases (too few points, all points coincident) defined as `0.0`
//! rather than errors.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

/// Minimum number of captured points for a stroke to be scorable.
///
/// A gesture shorter than this carries no reliable shape information and
/// scores `0.0` unconditionally.
pub const MIN_SCORABLE_POINTS: usize = 10;

/// Multiplier applied to the relative start/end gap when penalizing an
/// unclosed stroke. Heuristic; changing it rescales every score, so it
/// stays fixed.
pub const GAP_PENALTY_FACTOR: f64 = 20.0;

/// A point in the capture surface's local coordinate space.
///
/// Origin is the surface's top-left corner, y grows downward (screen
/// convention). A point has no identity beyond its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite (not NaN or infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The ordered point sequence captured during one gesture.
///
/// Points are appended in capture order and never reordered or removed for
/// the lifetime of a gesture. A new gesture starts a new stroke; the
/// previous one is discarded once scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Create an empty stroke.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke containing only the gesture's first point.
    #[must_use]
    pub fn begin_at(point: Point) -> Self {
        Self { points: vec![point] }
    }

    /// Append a captured point. Every reported move event contributes one
    /// point: no deduplication, no resampling, no minimum-distance filter.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// The captured points, in temporal order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of captured points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first captured point, if any.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// The last captured point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Index of the first point with a NaN or infinite coordinate, if any.
    ///
    /// The scorer's contract only covers finite coordinates; boundary layers
    /// (such as the stroke file codec) use this to reject bad input before
    /// it reaches the scoring pipeline.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.is_finite())
    }
}

/// Error returned by [`decode_stroke`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as stroke JSON.
    #[error("failed to decode stroke JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// A decoded coordinate was NaN or infinite.
    #[error("non-finite coordinate at point {index}")]
    NonFinite { index: usize },
}

/// Encode a stroke as JSON bytes (`{"points": [{"x": …, "y": …}, …]}`).
///
/// # Panics
///
/// Never panics in practice; a stroke is plain structs of numbers and
/// serializing it to a `Vec<u8>` is infallible.
#[must_use]
pub fn encode_stroke(stroke: &Stroke) -> Vec<u8> {
    serde_json::to_vec(stroke).unwrap_or_default()
}

/// Decode JSON bytes into a stroke, rejecting non-finite coordinates.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON and
/// [`CodecError::NonFinite`] when any coordinate is NaN or infinite.
pub fn decode_stroke(bytes: &[u8]) -> Result<Stroke, CodecError> {
    let stroke: Stroke = serde_json::from_slice(bytes)?;
    if let Some(index) = stroke.first_non_finite() {
        return Err(CodecError::NonFinite { index });
    }
    Ok(stroke)
}

/// The intermediate quantities computed while scoring a stroke.
///
/// Degenerate strokes (fewer than [`MIN_SCORABLE_POINTS`] points, or all
/// points coincident) report zeroes rather than partial statistics, matching
/// the scorer's early returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Arithmetic mean position of all points.
    pub centroid: Point,
    /// Mean distance from the centroid over all points.
    pub mean_radius: f64,
    /// Population standard deviation of the point-to-centroid distances.
    pub radius_std_dev: f64,
    /// Distance between the stroke's first and last point.
    pub gap: f64,
    /// Raw circularity term, `100 * (1 - std_dev / mean_radius)`. Can be
    /// negative for highly irregular strokes; only the final score is
    /// clamped.
    pub circularity: f64,
    /// Closure deduction, `max(0, gap / mean_radius * 20)`.
    pub gap_penalty: f64,
    /// Final score: circularity minus gap penalty, clamped to `[0, 100]`.
    pub score: f64,
}

impl ScoreBreakdown {
    fn degenerate() -> Self {
        Self {
            centroid: Point::new(0.0, 0.0),
            mean_radius: 0.0,
            radius_std_dev: 0.0,
            gap: 0.0,
            circularity: 0.0,
            gap_penalty: 0.0,
            score: 0.0,
        }
    }
}

/// Score a stroke and report every intermediate quantity.
///
/// Pure, O(n), total over finite inputs. Every captured point has equal
/// weight in the centroid, mean radius, and standard deviation — there is
/// no smoothing, outlier rejection, or resampling anywhere in the pipeline.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn score_breakdown(points: &[Point]) -> ScoreBreakdown {
    if points.len() < MIN_SCORABLE_POINTS {
        return ScoreBreakdown::degenerate();
    }

    let n = points.len() as f64;
    let centroid = Point::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    );

    let radii = points.iter().map(|p| p.distance_to(centroid)).collect::<Vec<_>>();
    let mean_radius = radii.iter().sum::<f64>() / n;

    // Every point coincides with the centroid: a "dot" gesture. Bail before
    // the std-dev ratio divides by zero.
    if mean_radius == 0.0 {
        return ScoreBreakdown { centroid, ..ScoreBreakdown::degenerate() };
    }

    let variance = radii.iter().map(|r| (r - mean_radius).powi(2)).sum::<f64>() / n;
    let radius_std_dev = variance.sqrt();
    let circularity = 100.0 * (1.0 - radius_std_dev / mean_radius);

    let gap = points[0].distance_to(points[points.len() - 1]);
    let gap_penalty = (gap / mean_radius * GAP_PENALTY_FACTOR).max(0.0);

    ScoreBreakdown {
        centroid,
        mean_radius,
        radius_std_dev,
        gap,
        circularity,
        gap_penalty,
        score: (circularity - gap_penalty).clamp(0.0, 100.0),
    }
}

/// Score a stroke: how closely does it approximate a perfect circle?
///
/// Returns a value in `[0.0, 100.0]`. Strokes with fewer than
/// [`MIN_SCORABLE_POINTS`] points, and strokes whose points all coincide,
/// score `0.0`.
#[must_use]
pub fn circularity_score(points: &[Point]) -> f64 {
    score_breakdown(points).score
}

/// Quality tier for a final score.
///
/// Thresholds match the game's presentation layer, with exclusive lower
/// bounds: a score of exactly 95 is `Incredible`, not `Perfect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Score above 95.
    Perfect,
    /// Score above 90. This is also the threshold hosts use for
    /// celebratory effects.
    Incredible,
    /// Score above 80.
    Great,
    /// Score above 50.
    Decent,
    /// Everything else.
    TryAgain,
}

impl Tier {
    /// Classify a final score.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score > 95.0 {
            Self::Perfect
        } else if score > 90.0 {
            Self::Incredible
        } else if score > 80.0 {
            Self::Great
        } else if score > 50.0 {
            Self::Decent
        } else {
            Self::TryAgain
        }
    }

    /// Stable lowercase label for hosts and machine output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Incredible => "incredible",
            Self::Great => "great",
            Self::Decent => "decent",
            Self::TryAgain => "try-again",
        }
    }
}

/// Running best score for the current session.
///
/// This is the score consumer's side of the pipeline: hosts feed it each
/// completed gesture's score and read back the maximum. It is deliberately
/// not wired into the capture engine — the engine reports scores and holds
/// no history across gestures. In-memory only; nothing persists beyond the
/// session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionBest {
    best: Option<f64>,
}

impl SessionBest {
    /// Start a session with no recorded score.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score. Returns `true` when it beats the previous best
    /// (a first score always does).
    pub fn observe(&mut self, score: f64) -> bool {
        let improved = self.best.is_none_or(|best| score > best);
        if improved {
            self.best = Some(score);
        }
        improved
    }

    /// The best score observed this session, if any gesture has completed.
    #[must_use]
    pub fn best(&self) -> Option<f64> {
        self.best
    }
}
