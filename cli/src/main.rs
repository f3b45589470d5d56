use std::fs;
use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use rand::Rng;
use scoring::{ScoreBreakdown, Stroke, Tier, decode_stroke, encode_stroke, score_breakdown};


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("{path}: {source}")]
    Stroke { path: String, source: scoring::CodecError },
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
    #[error("--gap-deg must be at least 0 and below 360, got {0}")]
    InvalidGap(f64),
    #[error("at least {min} points are required, got {got}")]
    TooFewPoints { min: usize, got: usize },
}

#[derive(Parser, Debug)]
#[command(name = "circle-cli", about = "Circle-game stroke scoring and generation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score stroke JSON files.
    Score(ScoreCommand),
    /// Generate a synthetic stroke as JSON.
    Gen(GenCommand),
}

#[derive(Args, Debug)]
struct ScoreCommand {
    /// Stroke files to score, each `{"points": [{"x": …, "y": …}, …]}`.
    #[arg(required = true)]
    files: Vec<String>,

    /// Print the full score breakdown for each file.
    #[arg(long)]
    explain: bool,

    /// Emit one JSON report per file instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct GenCommand {
    #[command(subcommand)]
    shape: ShapeCommand,
}

#[derive(Subcommand, Debug)]
enum ShapeCommand {
    /// A closed circle: the starting point is repeated at the end.
    Circle {
        /// Samples around the circle (the closing point is added on top).
        #[arg(long, default_value_t = 360)]
        points: usize,
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        #[arg(long, default_value_t = 0.0)]
        cx: f64,
        #[arg(long, default_value_t = 0.0)]
        cy: f64,
        /// Uniform radial jitter amplitude, in the same units as --radius.
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<String>,
    },
    /// An open circular arc, leaving --gap-deg of the circle undrawn.
    Arc {
        #[arg(long, default_value_t = 271)]
        points: usize,
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        #[arg(long, default_value_t = 0.0)]
        cx: f64,
        #[arg(long, default_value_t = 0.0)]
        cy: f64,
        /// Width of the opening in degrees, at least 0 and below 360.
        #[arg(long, default_value_t = 90.0)]
        gap_deg: f64,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Evenly spaced points along a straight segment.
    Line {
        #[arg(long, default_value_t = 20)]
        points: usize,
        #[arg(long, default_value_t = 0.0)]
        x0: f64,
        #[arg(long, default_value_t = 0.0)]
        y0: f64,
        #[arg(long, default_value_t = 190.0)]
        x1: f64,
        #[arg(long, default_value_t = 0.0)]
        y1: f64,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Repeated samples of a single position.
    Dot {
        #[arg(long, default_value_t = 20)]
        points: usize,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Score(cmd) => run_score(&cmd),
        Command::Gen(cmd) => run_gen(cmd),
    }
}

// =============================================================
// score
// =============================================================

fn run_score(cmd: &ScoreCommand) -> Result<(), CliError> {
    for path in &cmd.files {
        let bytes = fs::read(path).map_err(|source| CliError::Read { path: path.clone(), source })?;
        let stroke =
            decode_stroke(&bytes).map_err(|source| CliError::Stroke { path: path.clone(), source })?;
        let breakdown = score_breakdown(stroke.points());
        let tier = Tier::for_score(breakdown.score);
        tracing::debug!(path = %path, points = stroke.len(), score = breakdown.score, "scored stroke");

        if cmd.json {
            println!("{}", score_report(path, &stroke, &breakdown, tier, cmd.explain)?);
        } else {
            println!("{path}: {:.1}% ({})", breakdown.score, tier.label());
            if cmd.explain {
                print_breakdown(&breakdown);
            }
        }
    }
    Ok(())
}

fn score_report(
    path: &str,
    stroke: &Stroke,
    breakdown: &ScoreBreakdown,
    tier: Tier,
    explain: bool,
) -> Result<serde_json::Value, CliError> {
    let mut report = serde_json::json!({
        "file": path,
        "points": stroke.len(),
        "score": breakdown.score,
        "tier": tier,
    });
    if explain
        && let Some(fields) = report.as_object_mut()
    {
        fields.insert("breakdown".to_owned(), serde_json::to_value(breakdown)?);
    }
    Ok(report)
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!("  centroid        ({:.2}, {:.2})", breakdown.centroid.x, breakdown.centroid.y);
    println!("  mean radius     {:.2}", breakdown.mean_radius);
    println!("  radius std dev  {:.2}", breakdown.radius_std_dev);
    println!("  start/end gap   {:.2}", breakdown.gap);
    println!("  circularity     {:.2}", breakdown.circularity);
    println!("  gap penalty     {:.2}", breakdown.gap_penalty);
}

// =============================================================
// gen
// =============================================================

fn run_gen(cmd: GenCommand) -> Result<(), CliError> {
    let (stroke, out) = match cmd.shape {
        ShapeCommand::Circle { points, radius, cx, cy, jitter, out } => {
            (circle_stroke(points, radius, cx, cy, jitter)?, out)
        }
        ShapeCommand::Arc { points, radius, cx, cy, gap_deg, out } => {
            (arc_stroke(points, radius, cx, cy, gap_deg)?, out)
        }
        ShapeCommand::Line { points, x0, y0, x1, y1, out } => {
            (line_stroke(points, x0, y0, x1, y1)?, out)
        }
        ShapeCommand::Dot { points, x, y, out } => (dot_stroke(points, x, y)?, out),
    };

    tracing::debug!(points = stroke.len(), "generated stroke");
    emit_stroke(&stroke, out.as_deref())
}

/// Sample `points` positions around a full circle, then repeat the first
/// sample to close the loop. Jitter perturbs each sample's radius uniformly.
#[allow(clippy::cast_precision_loss)]
fn circle_stroke(
    points: usize,
    radius: f64,
    cx: f64,
    cy: f64,
    jitter: f64,
) -> Result<Stroke, CliError> {
    if points < 1 {
        return Err(CliError::TooFewPoints { min: 1, got: points });
    }

    let mut rng = rand::rng();
    let mut stroke = Stroke::new();
    for i in 0..points {
        let theta = (i as f64 * 360.0 / points as f64).to_radians();
        let r = if jitter > 0.0 { radius + rng.random_range(-jitter..=jitter) } else { radius };
        stroke.push(scoring::Point::new(cx + r * theta.cos(), cy + r * theta.sin()));
    }
    if let Some(first) = stroke.first() {
        stroke.push(first);
    }
    Ok(stroke)
}

/// Sample `points` positions along the drawn part of a circle whose final
/// `gap_deg` degrees are left open. The stroke is not closed.
#[allow(clippy::cast_precision_loss)]
fn arc_stroke(
    points: usize,
    radius: f64,
    cx: f64,
    cy: f64,
    gap_deg: f64,
) -> Result<Stroke, CliError> {
    if points < 2 {
        return Err(CliError::TooFewPoints { min: 2, got: points });
    }
    if !(0.0..360.0).contains(&gap_deg) {
        return Err(CliError::InvalidGap(gap_deg));
    }

    let sweep = 360.0 - gap_deg;
    let mut stroke = Stroke::new();
    for i in 0..points {
        let theta = (i as f64 * sweep / (points as f64 - 1.0)).to_radians();
        stroke.push(scoring::Point::new(cx + radius * theta.cos(), cy + radius * theta.sin()));
    }
    Ok(stroke)
}

/// Sample `points` positions evenly between two endpoints (inclusive).
#[allow(clippy::cast_precision_loss)]
fn line_stroke(points: usize, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Stroke, CliError> {
    if points < 2 {
        return Err(CliError::TooFewPoints { min: 2, got: points });
    }

    let mut stroke = Stroke::new();
    for i in 0..points {
        let t = i as f64 / (points as f64 - 1.0);
        stroke.push(scoring::Point::new(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t));
    }
    Ok(stroke)
}

/// Repeat one position `points` times — the degenerate "dot" gesture.
fn dot_stroke(points: usize, x: f64, y: f64) -> Result<Stroke, CliError> {
    if points < 1 {
        return Err(CliError::TooFewPoints { min: 1, got: points });
    }

    let mut stroke = Stroke::new();
    for _ in 0..points {
        stroke.push(scoring::Point::new(x, y));
    }
    Ok(stroke)
}

fn emit_stroke(stroke: &Stroke, out: Option<&str>) -> Result<(), CliError> {
    let mut bytes = encode_stroke(stroke);
    bytes.push(b'\n');
    match out {
        Some(path) => fs::write(path, &bytes)
            .map_err(|source| CliError::Write { path: path.to_owned(), source }),
        None => io::stdout()
            .write_all(&bytes)
            .map_err(|source| CliError::Write { path: "<stdout>".to_owned(), source }),
    }
}
