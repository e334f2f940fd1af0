// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::viewport::{Rotation, Size};
use crate::visualizer::Color;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    swing-overlay inspect --payload analysis.json
    swing-overlay probe --payload analysis.json --at 1500 --video 1920x1080 --rotation 90
    swing-overlay render --payload analysis.json --video 1920x1080 --viewport 390x844 --step 33
    swing-overlay render -p analysis.json --video 1080x1920 --viewport 1080x1920 --at 900 --background frame.png"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,

    /// Show additional detail (dropped connections, repaired frame order)
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize an analysis response
    Inspect(InspectArgs),
    /// Print the overlay for one playback position
    Probe(ProbeArgs),
    /// Render overlay frames to PNG images
    Render(RenderArgs),
}

/// Options shared by every command that reads a payload.
#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Path to the analysis response JSON
    #[arg(short, long)]
    pub payload: PathBuf,

    /// Override the payload's minimum landmark visibility
    #[arg(long)]
    pub min_vis: Option<f32>,
}

/// Frame and viewport geometry options.
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Decoded video size as reported by the decoder (WxH)
    #[arg(long, value_parser = parse_size)]
    pub video: Size,

    /// Clockwise display rotation of the video stream in degrees
    #[arg(long, default_value = "0", value_parser = parse_rotation)]
    pub rotation: Rotation,

    /// Viewport size (WxH). Defaults to the rotation-corrected video size
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,
}

/// Arguments for the inspect command.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

/// Arguments for the probe command.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Playback position in milliseconds
    #[arg(long)]
    pub at: u64,

    /// Print the composed scene as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Arguments for the render command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Render a single playback position in milliseconds
    #[arg(long, conflicts_with = "step")]
    pub at: Option<u64>,

    /// Interval between rendered positions when replaying the whole series
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub step: u64,

    /// Display-oriented video frame drawn under the overlay
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Output directory. Defaults to runs/overlay/render{N}
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bone line width in pixels
    #[arg(long, default_value_t = 4.0)]
    pub bone_width: f32,

    /// Joint circle radius in pixels
    #[arg(long, default_value_t = 6.0)]
    pub joint_radius: f32,

    /// Bone color (name or hex)
    #[arg(long, default_value = "white", value_parser = parse_color)]
    pub bone_color: Color,

    /// Joint color (name or hex)
    #[arg(long, default_value = "white", value_parser = parse_color)]
    pub joint_color: Color,

    /// Color bones per limb from the pose palette
    #[arg(long, default_value_t = false)]
    pub limb_colors: bool,

    /// Do not draw bones
    #[arg(long, default_value_t = false)]
    pub no_bones: bool,

    /// Do not draw joints
    #[arg(long, default_value_t = false)]
    pub no_joints: bool,
}

fn parse_size(s: &str) -> Result<Size, String> {
    s.parse().map_err(|e: crate::OverlayError| e.to_string())
}

fn parse_rotation(s: &str) -> Result<Rotation, String> {
    s.parse().map_err(|e: crate::OverlayError| e.to_string())
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e: crate::OverlayError| e.to_string())
}
