//! Calendar extensions callable from rule codes.
//!
//! A rule code such as `{{hebrew}}` calls the extension registered under
//! `hebrew` with the rule's year, month and day. The extension returns a date
//! expression (usually `YYYY-MM-DD`) that replaces the call, or `None` if the
//! rule has no date in that year.

use crate::ast::Placeholder;
use crate::error::ResolveError;
use crate::parser::is_extension_name;
use crate::{hebrew, hijri};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A calendar conversion: `(year, month, day)` to a date expression.
pub type ExtensionFn = Arc<dyn Fn(i32, u32, u32) -> Option<String> + Send + Sync>;

/// Named calendar extensions.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: BTreeMap<String, ExtensionFn>,
}

impl ExtensionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `islamic` and `hebrew` extensions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .extensions
            .insert("islamic".to_string(), Arc::new(hijri::islamic));
        registry
            .extensions
            .insert("hebrew".to_string(), Arc::new(hebrew::hebrew));
        registry
    }

    /// Register `extension` under `name`, replacing any previous one.
    ///
    /// `name` must be lowercase ascii letters and must not shadow a built-in
    /// placeholder such as `easter`; other names could never be called.
    pub fn register<F>(&mut self, name: &str, extension: F) -> Result<(), ResolveError>
    where
        F: Fn(i32, u32, u32) -> Option<String> + Send + Sync + 'static,
    {
        if !is_extension_name(name) || name.parse::<Placeholder>().is_ok() {
            return Err(ResolveError::InvalidExtensionName(name.to_string()));
        }
        self.extensions.insert(name.to_string(), Arc::new(extension));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionFn> {
        self.extensions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    /// Call the extension `name`.
    pub fn call(&self, name: &str, year: i32, month: u32, day: u32) -> Result<Option<String>, ResolveError> {
        let extension = self
            .get(name)
            .ok_or_else(|| ResolveError::UnknownExtension(name.to_string()))?;
        Ok(extension(year, month, day))
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
