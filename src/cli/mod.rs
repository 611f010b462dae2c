//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod list;
pub mod logging;
mod transform;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{self, CliOverrides};
use crate::pixel::BlendMode;
use crate::registry::Registry;

pub use transform::{report, Session};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pixelfx - apply named image transforms
#[derive(Parser)]
#[command(name = "pfx")]
#[command(about = "pixelfx - greyscale, color blend, circle crop and blink animation for images")]
#[command(version)]
pub struct Cli {
    /// Path to pfx.toml (default: search upward from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra directory to search for input images (repeatable)
    #[arg(long = "root", global = true)]
    pub roots: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log filter replacing `[logging] level` from pfx.toml
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an image to greyscale
    Greyscale {
        /// Input image (path or name under an asset root)
        input: String,

        /// Output file or directory (ends with /).
        /// If omitted: {input}_greyscale.png next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Blend a color into an image
    Color {
        /// Input image (path or name under an asset root)
        input: String,

        /// Target color (#rgb or #rrggbb)
        #[arg(long)]
        color: String,

        /// Blend mode: tint, wash, softlight
        #[arg(long)]
        mode: Option<String>,

        /// Wash opacity (0.0-1.0)
        #[arg(long)]
        opacity: Option<f64>,

        /// Blend intensity (0.0-1.0)
        #[arg(long)]
        intensity: Option<f64>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Crop an image to a circle, optionally with a border ring
    Circle {
        /// Input image (path or name under an asset root)
        input: String,

        /// Border ring width in pixels
        #[arg(long, default_value = "0")]
        border: u32,

        /// Border color (#rgb or #rrggbb, default black)
        #[arg(long)]
        border_color: Option<String>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine two or more frames into an animated GIF
    Blink {
        /// Frames in order; glob patterns are expanded and sorted
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Delay per frame in milliseconds
        #[arg(long)]
        delay: Option<u32>,

        /// Repeat the animation forever
        #[arg(long = "loop", overrides_with = "no_loop")]
        looping: bool,

        /// Play the animation once
        #[arg(long)]
        no_loop: bool,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available transforms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Config overrides carried by this subcommand's flags.
    fn overrides(&self) -> Result<CliOverrides, String> {
        let mut overrides = CliOverrides::default();
        match self {
            Commands::Color { mode, opacity, intensity, .. } => {
                if let Some(m) = mode {
                    overrides.mode = Some(BlendMode::parse(m).ok_or_else(|| {
                        format!("unknown blend mode '{}' (expected tint, wash or softlight)", m)
                    })?);
                }
                overrides.opacity = *opacity;
                overrides.intensity = *intensity;
            }
            Commands::Circle { border_color, .. } => {
                overrides.border_color = border_color.clone();
            }
            Commands::Blink { delay, looping, no_loop, .. } => {
                overrides.delay_ms = *delay;
                overrides.looping = if *no_loop {
                    Some(false)
                } else if *looping {
                    Some(true)
                } else {
                    None
                };
            }
            Commands::Greyscale { .. } | Commands::List { .. } => {}
        }
        Ok(overrides)
    }
}

/// Run the CLI and return the process exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut overrides = match cli.command.overrides() {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    overrides.roots = cli.roots.clone();
    overrides.log_level = cli.log_level.clone();

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    if let Err(e) = config::merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    logging::init(cli.verbose, cli.quiet, &config.logging.level);

    let session = Session::new(Registry::builtin(), config);

    match cli.command {
        Commands::Greyscale { input, output } => {
            transform::run_greyscale(&session, &input, output.as_deref())
        }
        Commands::Color { input, color, output, .. } => {
            transform::run_color(&session, &input, &color, output.as_deref())
        }
        Commands::Circle { input, border, output, .. } => {
            transform::run_circle(&session, &input, border, output.as_deref())
        }
        Commands::Blink { inputs, output, .. } => {
            transform::run_blink(&session, &inputs, output.as_deref())
        }
        Commands::List { json } => list::run_list(&session.registry, json),
    }
}
