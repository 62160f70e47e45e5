//! Name and signature keyed dispatch table
//!
//! A [`DispatchTable`] maps `(method name, parameter-type signature)` onto a
//! precomputed thunk that coerces loosely-typed arguments and calls a backing
//! service. The signature is part of the key so overloads sharing a name
//! resolve independently. Tables are built once through
//! [`DispatchTableBuilder`] and never change afterwards, so a shared
//! reference can be invoked from any number of tasks without locking.

use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;

use super::error::{ClpError, ClpResult};
use super::value::Value;

/// Future returned by a dispatch thunk
pub type InvokeFuture = BoxFuture<'static, ClpResult<Value>>;

type Thunk = Box<dyn Fn(Vec<Value>) -> InvokeFuture + Send + Sync>;

/// One registered operation
pub struct DispatchEntry {
    name: String,
    parameter_types: Vec<String>,
    thunk: Thunk,
}

impl DispatchEntry {
    pub fn new<F, Fut>(name: impl Into<String>, parameter_types: &[&str], thunk: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClpResult<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            parameter_types: parameter_types.iter().map(|t| t.to_string()).collect(),
            thunk: Box::new(move |args| Box::pin(thunk(args))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Exact name match plus positional match of the whole signature
    fn matches<S: AsRef<str>>(&self, name: &str, parameter_types: &[S]) -> bool {
        self.name == name
            && self.parameter_types.len() == parameter_types.len()
            && self
                .parameter_types
                .iter()
                .zip(parameter_types)
                .all(|(registered, requested)| registered == requested.as_ref())
    }
}

impl fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchEntry")
            .field("name", &self.name)
            .field("parameter_types", &self.parameter_types)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DispatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(", "))
    }
}

/// Immutable, ordered registry of dispatch entries
#[derive(Debug)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
}

impl DispatchTable {
    pub fn builder() -> DispatchTableBuilder {
        DispatchTableBuilder::default()
    }

    /// Find the entry registered under `name` with exactly `parameter_types`
    pub fn lookup<S: AsRef<str>>(&self, name: &str, parameter_types: &[S]) -> Option<&DispatchEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matches(name, parameter_types))
    }

    /// Resolve `(name, parameter_types)` and run the matching thunk
    ///
    /// # Errors
    /// * [`ClpError::UnsupportedDispatch`] when no entry matches
    /// * [`ClpError::Arity`] when `arguments` and the signature differ in length
    /// * [`ClpError::ArgumentType`] when an argument cannot be coerced
    /// * [`ClpError::Backing`] carrying the backing service's own error
    pub async fn invoke<S: AsRef<str>>(
        &self,
        name: &str,
        parameter_types: &[S],
        arguments: Vec<Value>,
    ) -> ClpResult<Value> {
        let entry = self
            .lookup(name, parameter_types)
            .ok_or_else(|| ClpError::UnsupportedDispatch {
                name: name.to_string(),
                parameter_types: parameter_types
                    .iter()
                    .map(|t| t.as_ref().to_string())
                    .collect(),
            })?;

        if arguments.len() != entry.parameter_types.len() {
            return Err(ClpError::Arity {
                name: entry.name.clone(),
                expected: entry.parameter_types.len(),
                actual: arguments.len(),
            });
        }

        (entry.thunk)(arguments).await
    }

    /// Entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects entries for a [`DispatchTable`], rejecting duplicate keys
#[derive(Debug, Default)]
pub struct DispatchTableBuilder {
    entries: Vec<DispatchEntry>,
}

impl DispatchTableBuilder {
    /// Register a thunk under `name` and `parameter_types`
    pub fn register<F, Fut>(self, name: &str, parameter_types: &[&str], thunk: F) -> ClpResult<Self>
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClpResult<Value>> + Send + 'static,
    {
        self.entry(DispatchEntry::new(name, parameter_types, thunk))
    }

    /// Add a prepared entry
    pub fn entry(mut self, entry: DispatchEntry) -> ClpResult<Self> {
        if self
            .entries
            .iter()
            .any(|existing| existing.matches(&entry.name, &entry.parameter_types))
        {
            return Err(ClpError::DuplicateRegistration {
                name: entry.name,
                parameter_types: entry.parameter_types,
            });
        }

        self.entries.push(entry);
        Ok(self)
    }

    pub fn build(self) -> DispatchTable {
        DispatchTable {
            entries: self.entries,
        }
    }
}
