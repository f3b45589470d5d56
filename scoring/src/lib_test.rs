#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Sample `n` points on a circle, evenly spaced over `sweep_deg` degrees.
fn arc_points(cx: f64, cy: f64, r: f64, n: usize, sweep_deg: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let theta = (i as f64 * sweep_deg / (n as f64 - 1.0)).to_radians();
            Point::new(cx + r * theta.cos(), cy + r * theta.sin())
        })
        .collect()
}

/// A full circle sampled every `step_deg` degrees, with the starting point
/// repeated at the end to close the loop.
fn closed_circle(cx: f64, cy: f64, r: f64, step_deg: usize) -> Vec<Point> {
    let mut points = (0..360 / step_deg)
        .map(|i| {
            let theta = ((i * step_deg) as f64).to_radians();
            Point::new(cx + r * theta.cos(), cy + r * theta.sin())
        })
        .collect::<Vec<_>>();
    points.push(points[0]);
    points
}

/// Deterministic pseudo-random sequence for fuzz-style tests (no rand dep).
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn coord(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 1000.0
    }
}

// --- Point ---

#[test]
fn point_distance_three_four_five() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance_to(b), 5.0));
}

#[test]
fn point_distance_to_self_is_zero() {
    let p = Point::new(7.5, -2.25);
    assert_eq!(p.distance_to(p), 0.0);
}

#[test]
fn point_distance_is_symmetric() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(-4.0, 9.0);
    assert!(approx_eq(a.distance_to(b), b.distance_to(a)));
}

#[test]
fn point_is_finite_rejects_nan_and_infinity() {
    assert!(Point::new(1.0, 2.0).is_finite());
    assert!(!Point::new(f64::NAN, 2.0).is_finite());
    assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    assert!(!Point::new(f64::NEG_INFINITY, f64::NAN).is_finite());
}

// --- Stroke ---

#[test]
fn stroke_new_is_empty() {
    let stroke = Stroke::new();
    assert!(stroke.is_empty());
    assert_eq!(stroke.len(), 0);
    assert!(stroke.first().is_none());
    assert!(stroke.last().is_none());
}

#[test]
fn stroke_begin_at_holds_single_point() {
    let stroke = Stroke::begin_at(Point::new(10.0, 20.0));
    assert_eq!(stroke.len(), 1);
    assert_eq!(stroke.first(), Some(Point::new(10.0, 20.0)));
    assert_eq!(stroke.first(), stroke.last());
}

#[test]
fn stroke_push_preserves_insertion_order() {
    let mut stroke = Stroke::begin_at(Point::new(0.0, 0.0));
    stroke.push(Point::new(1.0, 1.0));
    stroke.push(Point::new(2.0, 2.0));
    let xs = stroke.points().iter().map(|p| p.x).collect::<Vec<_>>();
    assert_eq!(xs, vec![0.0, 1.0, 2.0]);
}

#[test]
fn stroke_push_keeps_duplicate_points() {
    let mut stroke = Stroke::begin_at(Point::new(5.0, 5.0));
    stroke.push(Point::new(5.0, 5.0));
    stroke.push(Point::new(5.0, 5.0));
    assert_eq!(stroke.len(), 3);
}

#[test]
fn stroke_first_non_finite_reports_index() {
    let mut stroke = Stroke::begin_at(Point::new(0.0, 0.0));
    stroke.push(Point::new(1.0, 1.0));
    stroke.push(Point::new(f64::NAN, 2.0));
    assert_eq!(stroke.first_non_finite(), Some(2));
}

#[test]
fn stroke_first_non_finite_none_for_finite_points() {
    let mut stroke = Stroke::begin_at(Point::new(0.0, 0.0));
    stroke.push(Point::new(-1e12, 1e12));
    assert!(stroke.first_non_finite().is_none());
}

// --- Codec ---

#[test]
fn codec_round_trip_preserves_stroke() {
    let mut stroke = Stroke::begin_at(Point::new(1.5, -2.5));
    stroke.push(Point::new(3.25, 4.75));
    let bytes = encode_stroke(&stroke);
    let decoded = decode_stroke(&bytes).expect("decode should succeed");
    assert_eq!(decoded, stroke);
}

#[test]
fn codec_encodes_expected_json_shape() {
    let stroke = Stroke::begin_at(Point::new(1.0, 2.0));
    let json: serde_json::Value =
        serde_json::from_slice(&encode_stroke(&stroke)).expect("valid json");
    assert_eq!(json["points"][0]["x"], 1.0);
    assert_eq!(json["points"][0]["y"], 2.0);
}

#[test]
fn codec_rejects_malformed_json() {
    let err = decode_stroke(b"not json").expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn codec_rejects_wrong_shape() {
    let err = decode_stroke(br#"{"points": [{"x": 1.0}]}"#).expect_err("missing y should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn codec_rejects_out_of_range_coordinate() {
    // 1e999 either overflows to infinity (NonFinite) or fails the number
    // parse (Decode) depending on the JSON parser's float handling; both
    // must reject.
    assert!(decode_stroke(br#"{"points": [{"x": 1e999, "y": 0.0}]}"#).is_err());
}

// --- Scorer: degenerate inputs ---

#[test]
fn fewer_than_ten_points_scores_zero() {
    let points = arc_points(0.0, 0.0, 100.0, 9, 360.0);
    assert_eq!(circularity_score(&points), 0.0);
}

#[test]
fn empty_input_scores_zero() {
    assert_eq!(circularity_score(&[]), 0.0);
}

#[test]
fn exactly_ten_points_is_scorable() {
    let points = arc_points(0.0, 0.0, 100.0, 10, 360.0);
    assert!(circularity_score(&points) > 0.0);
}

#[test]
fn coincident_points_score_zero() {
    let points = vec![Point::new(42.0, 17.0); 20];
    assert_eq!(circularity_score(&points), 0.0);
}

#[test]
fn degenerate_breakdown_is_zeroed() {
    let breakdown = score_breakdown(&[Point::new(1.0, 1.0); 3]);
    assert_eq!(breakdown.score, 0.0);
    assert_eq!(breakdown.mean_radius, 0.0);
    assert_eq!(breakdown.gap_penalty, 0.0);
}

#[test]
fn dot_breakdown_keeps_centroid() {
    let breakdown = score_breakdown(&[Point::new(42.0, 17.0); 20]);
    assert!(approx_eq(breakdown.centroid.x, 42.0));
    assert!(approx_eq(breakdown.centroid.y, 17.0));
    assert_eq!(breakdown.score, 0.0);
}

// --- Scorer: clamp and purity invariants ---

#[test]
fn score_is_always_within_bounds() {
    let mut rng = Lcg(0x5eed);
    for round in 0..200 {
        let count = round % 40;
        let points = (0..count)
            .map(|_| Point::new(rng.coord(), rng.coord()))
            .collect::<Vec<_>>();
        let score = circularity_score(&points);
        assert!((0.0..=100.0).contains(&score), "score {score} out of bounds for {count} random points");
    }
}

#[test]
fn scoring_is_pure() {
    let points = arc_points(10.0, 20.0, 80.0, 50, 340.0);
    assert_eq!(circularity_score(&points), circularity_score(&points));
    assert_eq!(score_breakdown(&points), score_breakdown(&points));
}

// --- Scorer: synthetic shapes ---

#[test]
fn perfect_closed_circle_scores_near_hundred() {
    let points = closed_circle(200.0, 200.0, 150.0, 1);
    let breakdown = score_breakdown(&points);
    // The repeated closing point drags the centroid off-center by r/361, so
    // the dispersion is tiny but not zero.
    assert!(breakdown.score > 99.5, "expected ≈100, got {}", breakdown.score);
    assert!(breakdown.radius_std_dev < 0.5);
    assert!(breakdown.gap < 1e-9);
    assert_eq!(breakdown.gap_penalty, 0.0);
}

#[test]
fn open_arc_scores_below_closed_circle() {
    let closed = circularity_score(&closed_circle(0.0, 0.0, 100.0, 1));
    // Same circle with a 90°-wide opening: 271 samples over 270°.
    let open = score_breakdown(&arc_points(0.0, 0.0, 100.0, 271, 270.0));
    assert!(open.gap_penalty > 0.0);
    assert!(open.circularity > 70.0);
    assert!(open.score < closed - 20.0, "open {} vs closed {closed}", open.score);
}

#[test]
fn collinear_points_score_low() {
    let points = (0..20).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect::<Vec<_>>();
    let breakdown = score_breakdown(&points);
    // High radius dispersion plus a huge start/end gap drives this to the floor.
    assert_eq!(breakdown.score, 0.0);
    assert!(breakdown.radius_std_dev > 0.3 * breakdown.mean_radius);
}

#[test]
fn ten_degree_sampled_circle_beats_ninety_five() {
    // Radius 100 centered at the origin, sampled every 10°, start repeated.
    let points = closed_circle(0.0, 0.0, 100.0, 10);
    assert!(circularity_score(&points) > 95.0);
}

#[test]
fn breakdown_centroid_of_symmetric_square() {
    let mut points = Vec::new();
    for _ in 0..3 {
        points.push(Point::new(0.0, 0.0));
        points.push(Point::new(10.0, 0.0));
        points.push(Point::new(10.0, 10.0));
        points.push(Point::new(0.0, 10.0));
    }
    let breakdown = score_breakdown(&points);
    assert!(approx_eq(breakdown.centroid.x, 5.0));
    assert!(approx_eq(breakdown.centroid.y, 5.0));
}

#[test]
fn gap_measures_first_to_last_distance() {
    let mut points = arc_points(0.0, 0.0, 100.0, 20, 180.0);
    points[0] = Point::new(100.0, 0.0);
    let last = points.len() - 1;
    points[last] = Point::new(-100.0, 0.0);
    let breakdown = score_breakdown(&points);
    assert!(approx_eq(breakdown.gap, 200.0));
}

#[test]
fn translation_does_not_change_score() {
    let at_origin = closed_circle(0.0, 0.0, 100.0, 5);
    let shifted = at_origin
        .iter()
        .map(|p| Point::new(p.x + 1234.0, p.y - 567.0))
        .collect::<Vec<_>>();
    assert!(approx_eq(circularity_score(&at_origin), circularity_score(&shifted)));
}

// --- Tiers ---

#[test]
fn tier_thresholds_are_exclusive_lower_bounds() {
    assert_eq!(Tier::for_score(100.0), Tier::Perfect);
    assert_eq!(Tier::for_score(95.1), Tier::Perfect);
    assert_eq!(Tier::for_score(95.0), Tier::Incredible);
    assert_eq!(Tier::for_score(90.0), Tier::Great);
    assert_eq!(Tier::for_score(80.0), Tier::Decent);
    assert_eq!(Tier::for_score(50.0), Tier::TryAgain);
    assert_eq!(Tier::for_score(0.0), Tier::TryAgain);
}

#[test]
fn tier_labels_are_stable() {
    assert_eq!(Tier::Perfect.label(), "perfect");
    assert_eq!(Tier::TryAgain.label(), "try-again");
}

#[test]
fn tier_serializes_as_kebab_case() {
    let json = serde_json::to_string(&Tier::TryAgain).expect("serialize");
    assert_eq!(json, "\"try-again\"");
}

// --- Session best ---

#[test]
fn session_best_starts_empty() {
    assert!(SessionBest::new().best().is_none());
}

#[test]
fn session_best_first_score_always_improves() {
    let mut best = SessionBest::new();
    assert!(best.observe(0.0));
    assert_eq!(best.best(), Some(0.0));
}

#[test]
fn session_best_keeps_maximum() {
    let mut best = SessionBest::new();
    best.observe(40.0);
    assert!(best.observe(75.5));
    assert!(!best.observe(60.0));
    assert_eq!(best.best(), Some(75.5));
}

#[test]
fn session_best_ties_do_not_improve() {
    let mut best = SessionBest::new();
    best.observe(90.0);
    assert!(!best.observe(90.0));
    assert_eq!(best.best(), Some(90.0));
}
