//! Error type shared by the dispatcher, handlers and the I/O shell.

use std::path::PathBuf;

use crate::color::ColorError;

/// Boxed error returned by handlers. Anything that is not already a
/// [`TransformError`] is wrapped as [`TransformError::Processing`] by the
/// dispatcher.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`TransformError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Decode,
    Processing,
    Registration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not found",
            ErrorKind::Decode => "decode",
            ErrorKind::Processing => "processing",
            ErrorKind::Registration => "registration",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while registering or executing a transform
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Bad, missing or out-of-range parameter
    #[error("invalid parameter: {0}")]
    Validation(String),

    /// Border does not fit inside the circle
    #[error("border width {border_width} is too large for a {size}px circle (must be less than {})", size.div_ceil(2))]
    BorderTooLarge { border_width: u32, size: u32 },

    /// Animation needs at least two frames
    #[error("blink needs at least 2 frames, got {0}")]
    NotEnoughFrames(usize),

    /// Malformed color string
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorError),

    /// No transform registered under this name
    #[error("transform '{name}' not found (known transforms: {})", known.join(", "))]
    TransformNotFound { name: String, known: Vec<String> },

    /// Asset could not be located
    #[error("asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// Asset path exists but is not a regular file
    #[error("asset is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Input bytes are not a supported image
    #[error("decode error: {0}")]
    Decode(String),

    /// Unexpected failure inside a handler
    #[error("transform '{transform}' failed: {source}")]
    Processing {
        transform: String,
        #[source]
        source: BoxError,
    },

    /// Duplicate transform name
    #[error("transform '{0}' already exists")]
    Registration(String),
}

impl TransformError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Which broad category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::Validation(_)
            | TransformError::BorderTooLarge { .. }
            | TransformError::NotEnoughFrames(_)
            | TransformError::InvalidColor(_) => ErrorKind::Validation,
            TransformError::TransformNotFound { .. }
            | TransformError::AssetNotFound(_)
            | TransformError::NotAFile(_) => ErrorKind::NotFound,
            TransformError::Decode(_) => ErrorKind::Decode,
            TransformError::Processing { .. } => ErrorKind::Processing,
            TransformError::Registration(_) => ErrorKind::Registration,
        }
    }

    /// Messages of this error and every cause below it, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            messages.push(cause.to_string());
            current = cause.source();
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(TransformError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(TransformError::NotEnoughFrames(1).kind(), ErrorKind::Validation);
        assert_eq!(
            TransformError::InvalidColor(ColorError::MissingHash).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TransformError::AssetNotFound(PathBuf::from("a.png")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(TransformError::decode("x").kind(), ErrorKind::Decode);
        assert_eq!(TransformError::Registration("x".into()).kind(), ErrorKind::Registration);
    }

    #[test]
    fn test_not_found_message_names_transform() {
        let err = TransformError::TransformNotFound {
            name: "sepia".to_string(),
            known: vec!["blink".to_string(), "circle".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'sepia'"));
        assert!(msg.contains("blink, circle"));
    }

    #[test]
    fn test_border_too_large_message() {
        let err = TransformError::BorderTooLarge { border_width: 50, size: 100 };
        assert!(err.to_string().contains("less than 50"));
    }

    #[test]
    fn test_processing_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TransformError::Processing { transform: "circle".into(), source: Box::new(base) };
        let chain = err.chain();
        assert_eq!(chain.len(), 2);
        assert!(chain[0].contains("circle"));
        assert_eq!(chain[1], "boom");
    }
}
