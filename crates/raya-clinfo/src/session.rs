//! Driver selection and a loaded OpenCL library instance.

use std::rc::Rc;

use log::info;
use raya_sdk::{NativeFunctionRegistry, NativeValue};
use raya_stdlib_opencl::{register_opencl, Driver, FakeDriver, OpenCl};

/// Which driver backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Deterministic in-memory platforms
    Fake,
    /// System ICD loader
    Native,
}

/// Registry plus library bound to one driver.
pub struct Session {
    /// Registered `cl.*` functions
    pub registry: NativeFunctionRegistry,
    /// Library handle the functions are bound to
    pub lib: OpenCl,
}

impl Session {
    /// Load the library over `backend`.
    ///
    /// Builds without the `native` feature fall back to the in-memory driver.
    pub fn open(backend: Backend) -> anyhow::Result<Self> {
        raya_stdlib_opencl::self_check()?;
        let driver = select(backend);
        let mut registry = NativeFunctionRegistry::new();
        let lib = register_opencl(&mut registry, driver);
        Ok(Self { registry, lib })
    }

    /// Session over an explicit driver.
    pub fn with_driver(driver: Rc<dyn Driver>) -> Self {
        let mut registry = NativeFunctionRegistry::new();
        let lib = register_opencl(&mut registry, driver);
        Self { registry, lib }
    }

    /// Call a registered `cl.*` function.
    pub fn call(&self, name: &str, args: &[NativeValue]) -> anyhow::Result<NativeValue> {
        Ok(self.registry.call(name, args)?)
    }
}

#[cfg(feature = "native")]
fn select(backend: Backend) -> Rc<dyn Driver> {
    match backend {
        Backend::Native => {
            info!("using the system OpenCL loader");
            Rc::new(raya_stdlib_opencl::NativeDriver::new())
        }
        Backend::Fake => fake(),
    }
}

#[cfg(not(feature = "native"))]
fn select(backend: Backend) -> Rc<dyn Driver> {
    if backend == Backend::Native {
        log::warn!("built without the `native` feature; using the in-memory driver");
    }
    fake()
}

fn fake() -> Rc<dyn Driver> {
    info!("using the in-memory driver");
    Rc::new(FakeDriver::with_sample_platforms())
}
