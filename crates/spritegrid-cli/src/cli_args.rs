//! CLI argument definitions for the spritegrid command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined
//! here, keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// spritegrid - Sprite-Sheet Analysis Toolkit
#[derive(Parser)]
#[command(name = "spritegrid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the sprite cell grid of a sheet
    Detect {
        /// Path to the input PNG sheet
        #[arg(short, long)]
        input: String,

        /// Detection strategy
        #[arg(long, default_value = "auto-best", value_parser = [
            "auto-best",
            "uniform-grid",
            "boundary-scoring",
            "cluster-centroid",
            "distance-transform",
            "region-growing",
        ])]
        algorithm: String,

        /// Expected number of sprites (required by uniform-grid)
        #[arg(long)]
        expected_count: Option<u32>,

        /// Cached result record; reused when fresh, rewritten when stale
        #[arg(long)]
        cache: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Crop a sprite to its visible content, remapping the pivot
    Crop {
        /// Path to the input PNG
        #[arg(short, long)]
        input: String,

        /// Path for the cropped PNG
        #[arg(short, long)]
        output: String,

        /// Uniform padding around the visible bounding box
        #[arg(long, default_value_t = 0)]
        padding: u32,

        /// Per-side padding overrides
        #[arg(long)]
        padding_left: Option<u32>,
        #[arg(long)]
        padding_right: Option<u32>,
        #[arg(long)]
        padding_top: Option<u32>,
        #[arg(long)]
        padding_bottom: Option<u32>,

        /// Normalized pivot of the input sprite
        #[arg(long, default_value_t = 0.5)]
        pivot_x: f32,
        #[arg(long, default_value_t = 0.5)]
        pivot_y: f32,

        /// Skip writing when the input is already tightly cropped
        #[arg(long)]
        only_if_needed: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compute the alpha-weighted center-of-mass pivot
    Pivot {
        /// Path to the input PNG
        #[arg(short, long)]
        input: String,

        /// Restrict to a sub-region, as "x,y,width,height"
        #[arg(long)]
        region: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
