//! Handler and validator seams for the registry.

use crate::error::{BoxError, TransformError};
use crate::transforms::TransformRequest;

/// What a handler returns: encoded bytes, or any error.
pub type HandlerResult = Result<Vec<u8>, BoxError>;

/// Runs a transform over a request and produces encoded output bytes.
///
/// Implemented for every `Fn(&TransformRequest) -> HandlerResult`, so plain
/// functions and closures can be registered directly.
pub trait TransformHandler: Send + Sync {
    fn run(&self, request: &TransformRequest) -> HandlerResult;
}

impl<F> TransformHandler for F
where
    F: Fn(&TransformRequest) -> HandlerResult + Send + Sync,
{
    fn run(&self, request: &TransformRequest) -> HandlerResult {
        self(request)
    }
}

/// Checks a request before the handler sees it.
pub type Validator = Box<dyn Fn(&TransformRequest) -> Result<(), TransformError> + Send + Sync>;

/// A registered transform: its handler and optional validator.
pub struct RegistryEntry {
    pub(crate) handler: Box<dyn TransformHandler>,
    pub(crate) validator: Option<Validator>,
}

impl RegistryEntry {
    pub fn new(handler: impl TransformHandler + 'static) -> Self {
        Self { handler: Box::new(handler), validator: None }
    }

    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Fn(&TransformRequest) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry").field("validator", &self.has_validator()).finish()
    }
}
