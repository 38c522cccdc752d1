//! Foreign objects exposed to the host
//!
//! A native module hands an object to the host as a `Userdata` cell: the
//! object itself plus a `Metatable` of methods bound to that instance. The
//! metatable may carry a marker string; a module checks the marker before it
//! trusts that a userdata value is one of its own.
//!
//! Reclamation: when the host drops the last reference to a cell, its
//! `__gc` method (if any) runs exactly once.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{AbiResult, NativeError};
use crate::value::NativeValue;

/// Metamethod invoked when the host reclaims a userdata cell
pub const GC_METHOD: &str = "__gc";

/// Metamethod used for string conversion
pub const TOSTRING_METHOD: &str = "__tostring";

/// An object owned by a native module and shared with the host.
pub trait ForeignObject: Any {
    /// Class name shown in diagnostics and string conversion
    fn class_name(&self) -> &'static str;

    /// Borrow as `Any` for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Rc<dyn Any>` for downcasting
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

/// A method bound to one instance. Arguments never include the receiver.
pub type NativeMethod = Rc<dyn Fn(&[NativeValue]) -> AbiResult<NativeValue>>;

/// How the host invoked a method.
///
/// `Method` is receiver syntax (`obj:info()`), so the argument list does not
/// contain the object. `Function` is a plain call through the field
/// (`obj.info(obj)`), where the first argument may be the object itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// Receiver syntax, receiver already elided
    Method,
    /// Free-function syntax, receiver possibly passed explicitly
    Function,
}

/// Capability table installed on a userdata cell at creation time.
#[derive(Default)]
pub struct Metatable {
    marker: Option<&'static str>,
    methods: HashMap<&'static str, NativeMethod>,
}

impl Metatable {
    /// Create an empty, unmarked metatable
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty metatable carrying a provenance marker
    pub fn with_marker(marker: &'static str) -> Self {
        Self {
            marker: Some(marker),
            methods: HashMap::new(),
        }
    }

    /// Register a method
    pub fn add_method(
        &mut self,
        name: &'static str,
        method: impl Fn(&[NativeValue]) -> AbiResult<NativeValue> + 'static,
    ) {
        self.methods.insert(name, Rc::new(method));
    }

    /// Provenance marker, if any
    pub fn marker(&self) -> Option<&'static str> {
        self.marker
    }

    /// Get a method by name
    pub fn method(&self, name: &str) -> Option<&NativeMethod> {
        self.methods.get(name)
    }

    /// Method names in sorted order
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Metatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metatable")
            .field("marker", &self.marker)
            .field("methods", &self.method_names())
            .finish()
    }
}

/// A foreign object together with its bound capability table.
pub struct Userdata {
    object: Rc<dyn ForeignObject>,
    metatable: Metatable,
}

impl Userdata {
    /// Place an object in a new userdata cell
    pub fn new(object: Rc<dyn ForeignObject>, metatable: Metatable) -> Rc<Self> {
        Rc::new(Self { object, metatable })
    }

    /// The wrapped object
    pub fn object(&self) -> &Rc<dyn ForeignObject> {
        &self.object
    }

    /// The capability table
    pub fn metatable(&self) -> &Metatable {
        &self.metatable
    }

    /// Downcast the wrapped object to a concrete type
    pub fn downcast<T: ForeignObject>(&self) -> Option<Rc<T>> {
        self.object.clone().into_any().downcast::<T>().ok()
    }

    /// Call a bound method.
    ///
    /// With `CallStyle::Function` a leading argument that is this very cell
    /// is dropped before dispatch; any other leading argument is passed
    /// through untouched.
    pub fn call(
        self: &Rc<Self>,
        name: &str,
        args: &[NativeValue],
        style: CallStyle,
    ) -> AbiResult<NativeValue> {
        let method = self.metatable.method(name).ok_or_else(|| {
            NativeError::ModuleError(format!(
                "{} has no method '{}'",
                self.object.class_name(),
                name
            ))
        })?;
        let args = match style {
            CallStyle::Method => args,
            CallStyle::Function => strip_receiver(self, args),
        };
        method(args)
    }

    /// String conversion through `__tostring`, falling back to the class name
    pub fn describe(&self) -> String {
        match self.metatable.method(TOSTRING_METHOD).map(|m| m(&[])) {
            Some(Ok(NativeValue::String(s))) => s,
            _ => format!("{} ({:p})", self.object.class_name(), Rc::as_ptr(&self.object)),
        }
    }
}

impl Drop for Userdata {
    fn drop(&mut self) {
        if let Some(gc) = self.metatable.method(GC_METHOD) {
            let _ = gc(&[]);
        }
    }
}

impl fmt::Debug for Userdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Userdata")
            .field("class", &self.object.class_name())
            .field("metatable", &self.metatable)
            .finish()
    }
}

/// Drop the first argument when it is `bound` itself.
pub fn strip_receiver<'a>(bound: &Rc<Userdata>, args: &'a [NativeValue]) -> &'a [NativeValue] {
    match args.first() {
        Some(NativeValue::Userdata(first)) if Rc::ptr_eq(first, bound) => &args[1..],
        _ => args,
    }
}
