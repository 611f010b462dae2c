//! Transform command implementations (greyscale, color, circle, blink)
//!
//! Each command resolves its inputs, builds a typed request, dispatches it
//! through the registry and writes the returned bytes.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::assets::AssetResolver;
use crate::color::parse_hex;
use crate::config::PfxConfig;
use crate::error::{ErrorKind, TransformError};
use crate::output::{generate_output_path, write_output};
use crate::registry::Registry;
use crate::transforms::{
    BlinkParams, CircleParams, ColorParams, GreyscaleParams, ImageInput, TransformRequest,
};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Everything a transform command needs, built once per process.
pub struct Session {
    pub registry: Registry,
    pub config: PfxConfig,
    pub resolver: AssetResolver,
}

impl Session {
    pub fn new(registry: Registry, config: PfxConfig) -> Self {
        let resolver = AssetResolver::new(config.assets.roots.clone());
        Self { registry, config, resolver }
    }

    fn dispatch(&self, request: TransformRequest, first_input: &Path, output: Option<&Path>) -> ExitCode {
        let name = request.name();
        let bytes = match self.registry.execute(name, &request) {
            Ok(bytes) => bytes,
            Err(e) => return report(&e),
        };

        let path = generate_output_path(first_input, name, output);
        if let Err(e) = write_output(&bytes, &path) {
            eprintln!("Error: failed to write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        tracing::info!(transform = name, output = %path.display(), bytes = bytes.len(), "wrote output");
        println!("{}", path.display());
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Print an error with its cause chain and pick the exit code.
pub fn report(err: &TransformError) -> ExitCode {
    let chain = err.chain();
    eprintln!("Error ({}): {}", err.kind(), chain[0]);
    for cause in &chain[1..] {
        eprintln!("  caused by: {}", cause);
    }
    match err.kind() {
        ErrorKind::Validation => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

fn resolve_one(session: &Session, input: &str) -> Result<PathBuf, ExitCode> {
    session.resolver.resolve(input).map_err(|e| report(&e))
}

fn parse_color_arg(value: &str) -> Result<image::Rgb<u8>, ExitCode> {
    parse_hex(value).map_err(|e| report(&TransformError::from(e)))
}

/// Execute the greyscale command
pub fn run_greyscale(session: &Session, input: &str, output: Option<&Path>) -> ExitCode {
    let path = match resolve_one(session, input) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let request = TransformRequest::Greyscale(GreyscaleParams { input: ImageInput::File(path.clone()) });
    session.dispatch(request, &path, output)
}

/// Execute the color command
pub fn run_color(session: &Session, input: &str, color: &str, output: Option<&Path>) -> ExitCode {
    let path = match resolve_one(session, input) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let color = match parse_color_arg(color) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let defaults = &session.config.defaults;
    let request = TransformRequest::Color(ColorParams {
        input: ImageInput::File(path.clone()),
        mode: defaults.mode,
        color,
        opacity: defaults.opacity,
        intensity: defaults.intensity,
    });
    session.dispatch(request, &path, output)
}

/// Execute the circle command
pub fn run_circle(
    session: &Session,
    input: &str,
    border_width: u32,
    output: Option<&Path>,
) -> ExitCode {
    let path = match resolve_one(session, input) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let border_color = match parse_color_arg(&session.config.defaults.border_color) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let request = TransformRequest::Circle(CircleParams {
        input: ImageInput::File(path.clone()),
        border_width,
        border_color: Some(border_color),
    });
    session.dispatch(request, &path, output)
}

/// Execute the blink command
///
/// Each input may be a glob pattern; matches are added in sorted order.
pub fn run_blink(session: &Session, inputs: &[String], output: Option<&Path>) -> ExitCode {
    let mut paths = Vec::new();
    for input in inputs {
        match session.resolver.expand(input) {
            Ok(mut found) => paths.append(&mut found),
            Err(e) => return report(&e),
        }
    }

    let Some(first) = paths.first().cloned() else {
        return report(&TransformError::NotEnoughFrames(0));
    };

    let defaults = &session.config.defaults;
    let request = TransformRequest::Blink(BlinkParams {
        inputs: paths.into_iter().map(ImageInput::File).collect(),
        delay_ms: defaults.delay_ms,
        looping: defaults.looping,
    });
    session.dispatch(request, &first, output)
}
