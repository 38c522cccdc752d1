//! Native function registry with symbolic name dispatch
//!
//! Native modules register their entry points under symbolic names
//! (e.g., "cl.platforms"). The host resolves a name once and calls the
//! handler with the argument list of the call.
//!
//! Handlers are `Rc`-shared and not `Send`: a registry belongs to the single
//! host thread that drives the values it produces.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{AbiResult, NativeError};
use crate::value::NativeValue;

/// A native function handler (for symbolic name-based dispatch)
pub type NativeHandlerFn = Rc<dyn Fn(&[NativeValue]) -> AbiResult<NativeValue>>;

/// Registry of native functions indexed by symbolic name.
pub struct NativeFunctionRegistry {
    handlers: BTreeMap<String, NativeHandlerFn>,
}

impl NativeFunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a native function by name
    pub fn register(
        &mut self,
        name: &str,
        handler: impl Fn(&[NativeValue]) -> AbiResult<NativeValue> + 'static,
    ) {
        self.handlers.insert(name.to_string(), Rc::new(handler));
    }

    /// Get a handler by name
    pub fn get(&self, name: &str) -> Option<NativeHandlerFn> {
        self.handlers.get(name).cloned()
    }

    /// Resolve and call a handler
    pub fn call(&self, name: &str, args: &[NativeValue]) -> AbiResult<NativeValue> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| NativeError::ModuleError(format!("unknown native function '{}'", name)))?;
        handler(args)
    }

    /// Check if a handler is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(|s| s.as_str())
    }

    /// Get the number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for NativeFunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
