//! Transform registry and dispatcher
//!
//! Transforms are registered into a [`RegistryBuilder`] during start-up. Once
//! [`RegistryBuilder::build`] is called the resulting [`Registry`] is
//! immutable, so it can be shared across threads and every `execute` call is
//! independent.
//!
//! Names are case-insensitive. Registering the same name twice is an error;
//! the first registration stays active.

mod handler;

use std::collections::BTreeMap;

pub use handler::{HandlerResult, RegistryEntry, TransformHandler, Validator};

use crate::error::TransformError;
use crate::transforms::{
    blink, circle, colorize, greyscale, validate, TransformRequest, BLINK, CIRCLE, COLOR,
    GREYSCALE,
};

/// Normalize a transform name into its registry key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Mutable registration phase of a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, RegistryEntry>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// A builder pre-loaded with `greyscale`, `color`, `circle` and `blink`.
    pub fn with_builtins() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            GREYSCALE.to_string(),
            RegistryEntry::new(greyscale::run).with_validator(validate::validate_greyscale),
        );
        entries.insert(
            COLOR.to_string(),
            RegistryEntry::new(colorize::run).with_validator(validate::validate_color),
        );
        entries.insert(
            CIRCLE.to_string(),
            RegistryEntry::new(circle::run).with_validator(validate::validate_circle),
        );
        entries.insert(
            BLINK.to_string(),
            RegistryEntry::new(blink::run).with_validator(validate::validate_blink),
        );
        Self { entries }
    }

    /// Register a handler without a validator.
    pub fn register(
        &mut self,
        name: &str,
        handler: impl TransformHandler + 'static,
    ) -> Result<&mut Self, TransformError> {
        self.insert(name, RegistryEntry::new(handler))
    }

    /// Register a handler with a validator that runs before it.
    pub fn register_validated<V>(
        &mut self,
        name: &str,
        handler: impl TransformHandler + 'static,
        validator: V,
    ) -> Result<&mut Self, TransformError>
    where
        V: Fn(&TransformRequest) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.insert(name, RegistryEntry::new(handler).with_validator(validator))
    }

    /// Register a prepared entry.
    pub fn insert(&mut self, name: &str, entry: RegistryEntry) -> Result<&mut Self, TransformError> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(TransformError::validation("transform name must not be empty"));
        }
        if self.entries.contains_key(&key) {
            tracing::warn!(transform = %key, "duplicate transform registration rejected");
            return Err(TransformError::Registration(key));
        }
        tracing::debug!(transform = %key, validated = entry.has_validator(), "registered transform");
        self.entries.insert(key, entry);
        Ok(self)
    }

    /// Check if a transform with the given name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    /// Freeze the registrations.
    pub fn build(self) -> Registry {
        Registry { entries: self.entries }
    }
}

/// Immutable name → handler map; the sole entry point for running transforms.
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Registry {
    /// Registry with the four built-in transforms.
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtins().build()
    }

    /// Check if a transform with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Get the number of registered transforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the transform registered under `name`.
    ///
    /// 1. Unknown names fail with [`TransformError::TransformNotFound`].
    /// 2. The validator, if any, runs first; its error is returned as-is.
    /// 3. Handler errors that are already [`TransformError`]s pass through;
    ///    anything else becomes [`TransformError::Processing`] with the
    ///    original error as its source.
    #[tracing::instrument(level = "debug", skip(self, request), fields(inputs = request.input_count()))]
    pub fn execute(&self, name: &str, request: &TransformRequest) -> Result<Vec<u8>, TransformError> {
        let key = normalize_name(name);
        let entry = self.entries.get(&key).ok_or_else(|| TransformError::TransformNotFound {
            name: name.to_string(),
            known: self.names(),
        })?;

        if let Some(validator) = &entry.validator {
            validator(request)?;
        }

        match entry.handler.run(request) {
            Ok(bytes) => {
                tracing::debug!(transform = %key, bytes = bytes.len(), "transform finished");
                Ok(bytes)
            }
            Err(err) => Err(match err.downcast::<TransformError>() {
                Ok(typed) => *typed,
                Err(source) => {
                    tracing::warn!(transform = %key, error = %source, "transform failed");
                    TransformError::Processing { transform: key, source }
                }
            }),
        }
    }

    /// Run a request under its own variant name.
    pub fn execute_request(&self, request: &TransformRequest) -> Result<Vec<u8>, TransformError> {
        self.execute(request.name(), request)
    }
}
