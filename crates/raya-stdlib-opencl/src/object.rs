//! Wrapped native handles
//!
//! A `Wrapped` owns the native references it took on a handle. Construction
//! does not retain; the allocation site calls `retain` (or `adopt` for a
//! handle fresh from a creation call) once the wrapper is placed in a host
//! userdata cell. Every reference held is released exactly once, by
//! `dispose`, the `close` method, or reclamation, whichever comes first.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use raya_sdk::{ForeignObject, Metatable, NativeError, NativeValue, Userdata, GC_METHOD, TOSTRING_METHOD};

use crate::driver::{Driver, InfoKey, RawHandle};
use crate::error::{ClError, ClResult};
use crate::guard;
use crate::library::OpenCl;
use crate::schema::InfoTable;
use crate::version::ApiVersion;

/// Provenance marker installed in every metatable this binding creates
pub const MARKER: &str = "OpenCL metatable";

/// Closed set of native object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `cl_platform_id`
    Platform,
    /// `cl_device_id`
    Device,
    /// `cl_context`
    Context,
    /// `cl_command_queue`
    Queue,
    /// `cl_mem` buffer
    Mem,
    /// `cl_mem` image
    Image,
    /// `cl_sampler`
    Sampler,
    /// `cl_program`
    Program,
    /// `cl_kernel`
    Kernel,
    /// `cl_event`
    Event,
}

impl Category {
    /// Every category
    pub const ALL: [Category; 10] = [
        Category::Platform,
        Category::Device,
        Category::Context,
        Category::Queue,
        Category::Mem,
        Category::Image,
        Category::Sampler,
        Category::Program,
        Category::Kernel,
        Category::Event,
    ];

    /// Canonical name, used by the type guard and string conversion
    pub const fn name(self) -> &'static str {
        match self {
            Category::Platform => "platform",
            Category::Device => "device",
            Category::Context => "context",
            Category::Queue => "queue",
            Category::Mem => "mem",
            Category::Image => "image",
            Category::Sampler => "sampler",
            Category::Program => "program",
            Category::Kernel => "kernel",
            Category::Event => "event",
        }
    }

    /// Parse a canonical name
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Tables merged by a plain `info()` call
    pub const fn tables(self) -> &'static [InfoTable] {
        match self {
            Category::Platform => &[InfoTable::Platform],
            Category::Device => &[InfoTable::Device],
            Category::Context => &[InfoTable::Context],
            Category::Queue => &[InfoTable::Queue],
            Category::Mem => &[InfoTable::Mem],
            Category::Image => &[InfoTable::Mem, InfoTable::Image],
            Category::Sampler => &[InfoTable::Sampler],
            Category::Program => &[InfoTable::Program],
            Category::Kernel => &[InfoTable::Kernel],
            Category::Event => &[InfoTable::Event],
        }
    }

    /// Table queried by `info(device)`
    pub const fn keyed_table(self) -> Option<InfoTable> {
        match self {
            Category::Program => Some(InfoTable::ProgramBuild),
            Category::Kernel => Some(InfoTable::Workgroup),
            _ => None,
        }
    }

    /// Whether the native API has retain/release for this category
    pub fn refcounted(self) -> bool {
        match self {
            Category::Platform => false,
            Category::Device => ApiVersion::V1_2.is_available(),
            _ => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One native handle plus the references this wrapper holds on it
pub struct Wrapped {
    driver: Rc<dyn Driver>,
    handle: RawHandle,
    category: Category,
    held: Cell<u32>,
    closed: Cell<bool>,
}

impl Wrapped {
    /// Wrap without retaining
    pub fn new(driver: Rc<dyn Driver>, handle: RawHandle, category: Category) -> Self {
        Wrapped {
            driver,
            handle,
            category,
            held: Cell::new(0),
            closed: Cell::new(false),
        }
    }

    /// Native handle; fails once the wrapper is closed
    pub fn handle(&self) -> ClResult<RawHandle> {
        if self.closed.get() {
            return Err(ClError::Closed(self.category.name()));
        }
        Ok(self.handle)
    }

    /// Native handle regardless of state, for display only
    pub fn raw(&self) -> RawHandle {
        self.handle
    }

    /// Category tag
    pub fn category(&self) -> Category {
        self.category
    }

    /// Driver this handle belongs to
    pub fn driver(&self) -> &Rc<dyn Driver> {
        &self.driver
    }

    /// Native references currently held
    pub fn held(&self) -> u32 {
        self.held.get()
    }

    /// Whether `close`/`dispose` already ran
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Take one more native reference. A no-op for categories without
    /// retain/release.
    pub fn retain(&self) -> ClResult<()> {
        let handle = self.handle()?;
        if !self.category.refcounted() {
            return Ok(());
        }
        self.driver
            .retain(self.category, handle)
            .map_err(ClError::native)?;
        self.held.set(self.held.get() + 1);
        debug!("retain {} {} (held {})", self.category, handle, self.held.get());
        Ok(())
    }

    /// Take ownership of the reference returned by a creation call
    pub fn adopt(&self) {
        if self.category.refcounted() && !self.closed.get() {
            self.held.set(self.held.get() + 1);
            debug!("adopt {} {}", self.category, self.handle);
        }
    }

    /// Give back one reference. Does nothing when none is held.
    pub fn release(&self) -> ClResult<()> {
        let held = self.held.get();
        if held == 0 {
            return Ok(());
        }
        self.held.set(held - 1);
        debug!("release {} {} (held {})", self.category, self.handle, held - 1);
        self.driver
            .release(self.category, self.handle)
            .map_err(ClError::native)
    }

    /// Release every held reference and close the wrapper.
    ///
    /// On failure the remaining references are abandoned, never released a
    /// second time.
    pub fn dispose(&self) -> ClResult<()> {
        if self.closed.get() {
            return Ok(());
        }
        self.closed.set(true);
        debug!("dispose {} {}", self.category, self.handle);
        while self.held.get() > 0 {
            if let Err(e) = self.release() {
                self.held.set(0);
                return Err(e);
            }
        }
        Ok(())
    }

    fn dispose_quietly(&self) {
        if let Err(e) = self.dispose() {
            warn!("releasing {} {} failed: {}", self.category, self.handle, e);
        }
    }
}

impl Drop for Wrapped {
    fn drop(&mut self) {
        self.dispose_quietly();
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("category", &self.category)
            .field("handle", &self.handle)
            .field("held", &self.held.get())
            .field("closed", &self.closed.get())
            .finish()
    }
}

/// Category-specific method: receiver, library, arguments without receiver
pub type Method<T> = fn(&T, &OpenCl, &[NativeValue]) -> ClResult<NativeValue>;

/// A host-visible wrapper of one category
pub trait ClObject: ForeignObject + Sized {
    /// Category tag
    const CATEGORY: Category;

    /// Methods beyond the common `info`, `__tostring`, `close`, `__gc`
    const METHODS: &'static [(&'static str, Method<Self>)];

    /// Construct around an unretained handle
    fn from_wrapped(wrapped: Wrapped) -> Self;

    /// The underlying handle
    fn wrapped(&self) -> &Wrapped;
}

/// Method names shared by every category
pub const COMMON_METHODS: [&str; 4] = ["info", TOSTRING_METHOD, "close", GC_METHOD];

fn common<T: ClObject>() -> [(&'static str, Method<T>); 4] {
    [
        ("info", info::<T>),
        (TOSTRING_METHOD, to_string::<T>),
        ("close", close::<T>),
        (GC_METHOD, finalize::<T>),
    ]
}

/// Every method name of `T`, sorted
pub fn method_names<T: ClObject>() -> Vec<&'static str> {
    let mut names: Vec<_> = COMMON_METHODS
        .iter()
        .copied()
        .chain(T::METHODS.iter().map(|(name, _)| *name))
        .collect();
    names.sort_unstable();
    names
}

/// Put `object` in a userdata cell with its bound methods.
///
/// Retention is left to the caller so a failed placement never leaks a
/// native reference.
pub(crate) fn place<T: ClObject>(lib: &OpenCl, object: T) -> (Rc<T>, NativeValue) {
    let object = Rc::new(object);
    let mut metatable = Metatable::with_marker(MARKER);
    for (name, method) in common::<T>().into_iter().chain(T::METHODS.iter().copied()) {
        let this = Rc::clone(&object);
        let lib = lib.clone();
        metatable.add_method(name, move |args| method(&this, &lib, args).map_err(NativeError::from));
    }
    let cell = Userdata::new(object.clone(), metatable);
    (object, NativeValue::Userdata(cell))
}

fn info<T: ClObject>(this: &T, lib: &OpenCl, args: &[NativeValue]) -> ClResult<NativeValue> {
    let wrapped = this.wrapped();
    match (T::CATEGORY.keyed_table(), args.first()) {
        (Some(table), Some(device)) if !device.is_null() => {
            let device = guard::check_object(device, Category::Device)?;
            lib.query(wrapped, &[table], InfoKey::Device(device.handle()?))
        }
        _ => lib.query(wrapped, T::CATEGORY.tables(), InfoKey::None),
    }
}

fn to_string<T: ClObject>(this: &T, _: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
    let wrapped = this.wrapped();
    let text = if wrapped.is_closed() {
        format!("OpenCL {} (closed)", T::CATEGORY)
    } else {
        format!("OpenCL {} ({:#x})", T::CATEGORY, wrapped.raw().addr())
    };
    Ok(NativeValue::String(text))
}

fn close<T: ClObject>(this: &T, _: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
    this.wrapped().dispose()?;
    Ok(NativeValue::null())
}

fn finalize<T: ClObject>(this: &T, _: &OpenCl, _: &[NativeValue]) -> ClResult<NativeValue> {
    this.wrapped().dispose_quietly();
    Ok(NativeValue::null())
}
