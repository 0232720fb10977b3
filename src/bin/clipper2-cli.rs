//! Command-line tool for exercising the clipping and offsetting engines
//! against paths stored as JSON.
//!
//! Grounded in `lightburn-converter`'s `clap` derive + `anyhow::Context`
//! pattern (crates/libs/lightburn-converter/src/main.rs).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use clipper2::{
    ClipType, Clipper, ClipperOffset, EndType, JoinType, Paths, PolyFillType,
};

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Integer-exact polygon boolean clipping and offsetting",
    long_about = "Reads path sets from JSON files and runs the boolean clipper or the polygon offsetter against them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a boolean clip operation against two path sets.
    Clip {
        /// Subject paths, JSON array of arrays of {x,y} points
        #[arg(long)]
        subject: PathBuf,
        /// Clip paths, JSON array of arrays of {x,y} points
        #[arg(long)]
        clip: PathBuf,
        /// intersection | union | difference | xor
        #[arg(long, default_value = "intersection")]
        op: String,
        /// even-odd | non-zero | positive | negative
        #[arg(long = "subject-fill", default_value = "even-odd")]
        subject_fill: String,
        /// even-odd | non-zero | positive | negative
        #[arg(long = "clip-fill", default_value = "even-odd")]
        clip_fill: String,
        /// Output path, JSON array of arrays of {x,y} points
        #[arg(long)]
        output: PathBuf,
    },
    /// Inflate (delta > 0) or deflate (delta < 0) a path set.
    Offset {
        /// Input paths, JSON array of arrays of {x,y} points
        #[arg(long)]
        input: PathBuf,
        /// Offset distance, positive inflates, negative deflates
        #[arg(long)]
        delta: f64,
        /// square | round | miter
        #[arg(long = "join", default_value = "miter")]
        join_type: String,
        /// closed-polygon | closed-line | open-butt | open-square | open-round
        #[arg(long = "end", default_value = "closed-polygon")]
        end_type: String,
        #[arg(long = "miter-limit", default_value_t = 2.0)]
        miter_limit: f64,
        #[arg(long = "arc-tolerance", default_value_t = 0.25)]
        arc_tolerance: f64,
        /// Output path, JSON array of arrays of {x,y} points
        #[arg(long)]
        output: PathBuf,
    },
}

fn parse_fill_type(s: &str) -> Result<PolyFillType> {
    match s {
        "even-odd" => Ok(PolyFillType::EvenOdd),
        "non-zero" => Ok(PolyFillType::NonZero),
        "positive" => Ok(PolyFillType::Positive),
        "negative" => Ok(PolyFillType::Negative),
        other => anyhow::bail!("unknown fill type: {other}"),
    }
}

fn parse_clip_type(s: &str) -> Result<ClipType> {
    match s {
        "intersection" => Ok(ClipType::Intersection),
        "union" => Ok(ClipType::Union),
        "difference" => Ok(ClipType::Difference),
        "xor" => Ok(ClipType::Xor),
        other => anyhow::bail!("unknown clip type: {other}"),
    }
}

fn parse_join_type(s: &str) -> Result<JoinType> {
    match s {
        "square" => Ok(JoinType::Square),
        "round" => Ok(JoinType::Round),
        "miter" => Ok(JoinType::Miter),
        other => anyhow::bail!("unknown join type: {other}"),
    }
}

fn parse_end_type(s: &str) -> Result<EndType> {
    match s {
        "closed-polygon" => Ok(EndType::ClosedPolygon),
        "closed-line" => Ok(EndType::ClosedLine),
        "open-butt" => Ok(EndType::OpenButt),
        "open-square" => Ok(EndType::OpenSquare),
        "open-round" => Ok(EndType::OpenRound),
        other => anyhow::bail!("unknown end type: {other}"),
    }
}

fn read_paths(path: &PathBuf) -> Result<Paths> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse paths from: {}", path.display()))
}

fn write_paths(path: &PathBuf, paths: &Paths) -> Result<()> {
    let content = serde_json::to_string_pretty(paths)?;
    fs::write(path, content)
        .with_context(|| format!("failed to write output file: {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Clip { subject, clip, op, subject_fill, clip_fill, output } => {
            let subject_paths = read_paths(&subject)?;
            let clip_paths = read_paths(&clip)?;
            let clip_type = parse_clip_type(&op)?;
            let subject_fill = parse_fill_type(&subject_fill)?;
            let clip_fill = parse_fill_type(&clip_fill)?;

            let mut clipper = Clipper::new();
            clipper
                .add_paths(&subject_paths, clipper2::PolyType::Subject, true)
                .context("failed to add subject paths")?;
            clipper
                .add_paths(&clip_paths, clipper2::PolyType::Clip, true)
                .context("failed to add clip paths")?;
            let solution = clipper
                .execute(clip_type, subject_fill, clip_fill)
                .context("clip execution failed")?;
            write_paths(&output, &solution)?;
            log::info!("wrote {} result path(s) to {}", solution.len(), output.display());
        }
        Commands::Offset { input, delta, join_type, end_type, miter_limit, arc_tolerance, output } => {
            let paths = read_paths(&input)?;
            let join_type = parse_join_type(&join_type)?;
            let end_type = parse_end_type(&end_type)?;

            let mut offset = ClipperOffset::new(miter_limit, arc_tolerance);
            offset.add_paths(&paths, join_type, end_type);
            let solution = offset.execute(delta).context("offset execution failed")?;
            write_paths(&output, &solution)?;
            log::info!("wrote {} result path(s) to {}", solution.len(), output.display());
        }
    }

    Ok(())
}
